//! HTTP [`Gateway`] implementation.

use common::operations::{By, Delete, Insert, Perform, Select, Update};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;
use url::Url;

use crate::{
    domain::{
        booking::{self, Booking, ExportFormat},
        seller::{self, session::Token, Credentials, Seller},
    },
    form::BookingDraft,
    infra::Storage,
    read,
    session::Store,
};

use super::{Error, Gateway};

/// Source of the bearer credential attached to authenticated requests.
pub trait TokenProvider {
    /// Returns the current credential [`Token`], if any.
    fn token(&self) -> Option<Token>;
}

impl<S: Storage> TokenProvider for Store<S> {
    fn token(&self) -> Option<Token> {
        Store::token(self)
    }
}

/// [`Gateway`] talking to the remote REST backend over HTTP.
///
/// Every authenticated request replays the current session [`Token`] as
/// a bearer credential; every response is unwrapped from the backend's
/// `{errCode, errMessage, data}` envelope, turning a carried failure
/// indicator into [`Error::Rejected`].
#[derive(Clone, Debug)]
pub struct Http<T> {
    /// Base URL of the backend.
    base: Url,

    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Bearer credential source.
    token: T,
}

impl<T> Http<T> {
    /// Creates a new [`Http`] gateway against the given `base` URL.
    #[must_use]
    pub fn new(base: Url, token: T) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
            token,
        }
    }

    /// Resolves the given `path` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, Traced<Error>> {
        self.base
            .join(path)
            .map_err(|e| tracerr::new!(Error::Decode(e.to_string())))
    }

    /// Sends the `request` and unwraps the enveloped payload.
    async fn run<D: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<D, Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(|e| tracerr::new!(Error::Transport(e.to_string())))?;
        let envelope: Envelope<D> = response
            .json()
            .await
            .map_err(|e| tracerr::new!(Error::Decode(e.to_string())))?;
        envelope.into_result().map_err(|e| tracerr::new!(e))
    }

    /// Sends the `request`, expecting no payload beyond the envelope.
    async fn ack(
        request: reqwest::RequestBuilder,
    ) -> Result<(), Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(|e| tracerr::new!(Error::Transport(e.to_string())))?;
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| tracerr::new!(Error::Decode(e.to_string())))?;
        envelope.into_ack().map_err(|e| tracerr::new!(e))
    }
}

impl<T: TokenProvider> Http<T> {
    /// Builds an authenticated request to the given `path`.
    fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, Traced<Error>> {
        let mut request = self.client.request(method, self.endpoint(path)?);
        if let Some(token) = self.token.token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }
}

/// Wire envelope every backend response is wrapped in.
///
/// `errCode == 0` is the success indicator; anything else is an
/// application-level failure carried over a successful transport.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"), rename_all = "camelCase")]
struct Envelope<T> {
    /// Application-level success/failure indicator.
    err_code: i64,

    /// Message of the failure indicator, if any.
    #[serde(default)]
    err_message: Option<String>,

    /// Enveloped payload.
    #[serde(default)]
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the enveloped payload.
    fn into_result(self) -> Result<T, Error> {
        self.check()?.data.ok_or_else(|| {
            Error::Decode("envelope carries no `data`".into())
        })
    }

    /// Checks the envelope indicator, dropping any payload.
    fn into_ack(self) -> Result<(), Error> {
        self.check().map(drop)
    }

    /// Turns a carried failure indicator into [`Error::Rejected`].
    fn check(self) -> Result<Self, Error> {
        if self.err_code == 0 {
            Ok(self)
        } else {
            Err(Error::Rejected {
                message: self
                    .err_message
                    .unwrap_or_else(|| "unspecified failure".into()),
            })
        }
    }
}

/// Payload of a successful login.
#[derive(Debug, Deserialize)]
struct Login {
    /// Issued credential token.
    token: String,

    /// Profile of the signed-in seller.
    seller: Seller,
}

impl<T: TokenProvider> Gateway<Perform<Credentials>> for Http<T> {
    type Ok = (Seller, Token);
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(credentials): Perform<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret().to_string(),
        });

        // The one unauthenticated call.
        let request = self.client.post(self.endpoint("/api/login")?).json(&body);
        let login: Login = Self::run(request).await?;
        Ok((login.seller, Token::from(login.token)))
    }
}

impl<T: TokenProvider> Gateway<Select<By<Vec<Seller>, ()>>> for Http<T> {
    type Ok = Vec<Seller>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Seller>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::run(self.request(Method::GET, "/api/get-all-sellers")?).await
    }
}

impl<T: TokenProvider> Gateway<Select<By<Vec<Booking>, read::booking::Filter>>>
    for Http<T>
{
    type Ok = Vec<Booking>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, read::booking::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = match by.into_inner() {
            read::booking::Filter::All => {
                self.request(Method::GET, "/api/get-all-bookings")?
            }
            read::booking::Filter::BySeller(id) => self.request(
                Method::GET,
                &format!("/api/get-booking-by-seller/{id}"),
            )?,
        };
        Self::run(request).await
    }
}

impl<T: TokenProvider> Gateway<Insert<BookingDraft>> for Http<T> {
    type Ok = Booking;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<BookingDraft>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::run(
            self.request(Method::POST, "/api/create-booking")?.json(&draft),
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Update<(booking::Id, BookingDraft)>>
    for Http<T>
{
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(booking::Id, BookingDraft)>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::ack(
            self.request(Method::PUT, &format!("/api/update-booking/{id}"))?
                .json(&draft),
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Delete<By<Booking, booking::Id>>> for Http<T> {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Self::ack(
            self.request(Method::DELETE, &format!("/api/delete-booking/{id}"))?,
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Insert<seller::Draft>> for Http<T> {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<seller::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        // Only the envelope indicator matters: the caller re-lists the
        // directory rather than consuming the created profile.
        Self::ack(
            self.request(Method::POST, "/api/create-seller")?.json(&draft),
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Delete<By<Seller, seller::Id>>> for Http<T> {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Seller, seller::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Self::ack(
            self.request(Method::DELETE, &format!("/api/delete-seller/{id}"))?,
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Update<(seller::Id, seller::Patch)>>
    for Http<T>
{
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update((id, patch)): Update<(seller::Id, seller::Patch)>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::ack(
            self.request(Method::PUT, &format!("/api/update-seller/{id}"))?
                .json(&patch),
        )
        .await
    }
}

impl<T: TokenProvider> Gateway<Update<(seller::Id, seller::PasswordChange)>>
    for Http<T>
{
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update((id, change)): Update<(seller::Id, seller::PasswordChange)>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = serde_json::json!({
            "password": change.password.expose_secret().to_string(),
        });
        Self::ack(
            self.request(Method::PUT, &format!("/api/change-password/{id}"))?
                .json(&body),
        )
        .await
    }
}

impl<T: TokenProvider>
    Gateway<Select<By<read::dashboard::Stats, read::booking::Filter>>>
    for Http<T>
{
    type Ok = read::dashboard::Stats;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::dashboard::Stats, read::booking::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = match by.into_inner() {
            read::booking::Filter::All => {
                self.request(Method::GET, "/api/get-dashboard")?
            }
            read::booking::Filter::BySeller(id) => self.request(
                Method::GET,
                &format!("/api/get-seller-dashboard/{id}"),
            )?,
        };
        Self::run(request).await
    }
}

impl<T: TokenProvider>
    Gateway<
        Select<
            By<
                Vec<read::dashboard::SellerRevenue>,
                (read::dashboard::Month, read::dashboard::Year),
            >,
        >,
    > for Http<T>
{
    type Ok = Vec<read::dashboard::SellerRevenue>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::dashboard::SellerRevenue>,
                (read::dashboard::Month, read::dashboard::Year),
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (month, year) = by.into_inner();
        Self::run(
            self.request(Method::GET, "/api/get-revenue-by-seller")?
                .query(&[
                    ("month", u8::from(month).to_string()),
                    ("year", i32::from(year).to_string()),
                ]),
        )
        .await
    }
}

impl<T: TokenProvider>
    Gateway<Select<By<Url, (booking::Id, ExportFormat)>>> for Http<T>
{
    type Ok = Url;
    type Err = Traced<Error>;

    /// Builds the browser-navigable export URL.
    ///
    /// No request is made and no response is parsed: exporting is
    /// delegated entirely to the backend, the client only opens the URL.
    async fn execute(
        &self,
        Select(by): Select<By<Url, (booking::Id, ExportFormat)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, format) = by.into_inner();
        match format {
            ExportFormat::Pdf => {
                self.endpoint(&format!("/api/bookings/{id}/export"))
            }
            ExportFormat::Txt => {
                self.endpoint(&format!("/api/bookings/{id}/export-txt"))
            }
            ExportFormat::Image => {
                let mut url = self
                    .endpoint(&format!("/api/bookings/{id}/export-image"))?;
                url.set_query(Some("format=jpg"));
                Ok(url)
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Handler as _,
    };
    use url::Url;

    use crate::domain::booking::ExportFormat;

    use super::{Envelope, Error, Http, Token, TokenProvider};

    /// [`TokenProvider`] of an unauthenticated client.
    struct NoToken;

    impl TokenProvider for NoToken {
        fn token(&self) -> Option<Token> {
            None
        }
    }

    fn gateway() -> Http<NoToken> {
        Http::new(Url::parse("https://backend.test").unwrap(), NoToken)
    }

    #[test]
    fn envelope_success_unwraps_data() {
        let envelope: Envelope<i32> =
            serde_json::from_str(r#"{"errCode": 0, "data": 5}"#).unwrap();

        assert_eq!(envelope.into_result().unwrap(), 5);
    }

    #[test]
    fn envelope_failure_carries_message() {
        let envelope: Envelope<i32> = serde_json::from_str(
            r#"{"errCode": 2, "errMessage": "seller not found"}"#,
        )
        .unwrap();

        match envelope.into_result() {
            Err(Error::Rejected { message }) => {
                assert_eq!(message, "seller not found");
            }
            Err(Error::Transport(_) | Error::Decode(_)) | Ok(_) => {
                panic!("expected `Rejected`")
            }
        }
    }

    #[test]
    fn envelope_failure_without_message_still_rejects() {
        let envelope: Envelope<i32> =
            serde_json::from_str(r#"{"errCode": 1}"#).unwrap();

        assert!(envelope.into_ack().is_err());
    }

    #[tokio::test]
    async fn export_urls_are_browser_navigable() {
        let gateway = gateway();

        let pdf = gateway
            .execute(Select(By::<Url, _>::new((7.into(), ExportFormat::Pdf))))
            .await
            .unwrap();
        assert_eq!(pdf.as_str(), "https://backend.test/api/bookings/7/export");

        let image = gateway
            .execute(Select(By::<Url, _>::new((
                7.into(),
                ExportFormat::Image,
            ))))
            .await
            .unwrap();
        assert_eq!(
            image.as_str(),
            "https://backend.test/api/bookings/7/export-image?format=jpg",
        );
    }
}
