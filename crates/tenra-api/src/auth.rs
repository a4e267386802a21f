// Tenant sign-in endpoint.

use secrecy::{ExposeSecret, SecretString};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{SignInData, SignInRequest};

impl ApiClient {
    /// Authenticate with `(phone number, password)` against
    /// `POST /tenant/signin`.
    ///
    /// Returns the signed-in user with the bearer token embedded. The
    /// token is NOT installed automatically -- `tenra-core` decides when
    /// to call [`set_token`](Self::set_token) so a failed follow-up
    /// (e.g. session persistence) never leaves a half-installed session.
    pub async fn sign_in(
        &self,
        phone_number: &str,
        password: &SecretString,
    ) -> Result<SignInData, Error> {
        let request = SignInRequest {
            phone_number: phone_number.to_owned(),
            password: password.expose_secret().to_owned(),
        };

        self.post_public("tenant/signin", &request).await
    }
}
