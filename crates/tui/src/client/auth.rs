use api_types::auth::{AuthSession, AuthUser, Credentials, RefreshGrant, SignUpResponse};

use super::{Client, ClientError};

impl Client {
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let mut endpoint = self.endpoint("auth/v1/token")?;
        endpoint.set_query(Some("grant_type=password"));

        let res = self
            .http
            .post(endpoint)
            .header("apikey", &self.api_key)
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<AuthSession>().await?);
        }
        Err(ClientError::from_response(res).await)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, ClientError> {
        let endpoint = self.endpoint("auth/v1/signup")?;

        let res = self
            .http
            .post(endpoint)
            .header("apikey", &self.api_key)
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<SignUpResponse>().await?);
        }
        Err(ClientError::from_response(res).await)
    }

    /// Exchanges a refresh token for a new session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, ClientError> {
        let mut endpoint = self.endpoint("auth/v1/token")?;
        endpoint.set_query(Some("grant_type=refresh_token"));

        let res = self
            .http
            .post(endpoint)
            .header("apikey", &self.api_key)
            .json(&RefreshGrant {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<AuthSession>().await?);
        }
        Err(ClientError::from_response(res).await)
    }

    /// The user an access token belongs to; fails once the token expired.
    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, ClientError> {
        let endpoint = self.endpoint("auth/v1/user")?;

        let res = self
            .http
            .get(endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<AuthUser>().await?);
        }
        Err(ClientError::from_response(res).await)
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ClientError> {
        let endpoint = self.endpoint("auth/v1/logout")?;

        let res = self
            .http
            .post(endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(ClientError::from_response(res).await)
    }
}
