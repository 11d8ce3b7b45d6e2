//! The two configured backends: main API and AI tutor.
//!
//! Both clients come out of the same [`ClientBuilder`](crate::ClientBuilder)
//! and share one credential session and one refresh routine. Refresh always
//! goes to the main backend, which issues the tokens.

use std::sync::Arc;

use manabi_auth::Session;
use manabi_config::ApiConfig;

use crate::client::{ApiClient, SessionExpiredHook};
use crate::error::ApiError;
use crate::http::{ReqwestTransport, Transport};
use crate::paths::PublicPaths;
use crate::refresh::{HttpTokenRefresher, TokenRefresher};
use crate::services::{
    AdminService, AuthService, CommentService, CourseService, ForumService, LearningPathService,
    RoadmapService, TopicService, TutorService,
};

#[derive(Debug, Clone)]
pub struct Backends {
    pub api: ApiClient,
    pub tutor: ApiClient,
}

impl Backends {
    /// Build both clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if either base URL is malformed.
    pub fn from_config(
        config: &ApiConfig,
        session: Session,
        on_session_expired: Option<SessionExpiredHook>,
    ) -> Result<Self, ApiError> {
        let main_url = config
            .main_url()
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let ai_url = config
            .ai_url()
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let main_transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(
            &main_url,
            config.timeout(),
            &config.user_agent,
        )?);
        let ai_transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(
            &ai_url,
            config.timeout(),
            &config.user_agent,
        )?);

        Self::with_transports(
            (main_url, main_transport),
            (ai_url, ai_transport),
            session,
            on_session_expired,
        )
    }

    /// Build both clients over caller-supplied transports.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientBuilder::build`](crate::ClientBuilder::build) errors.
    pub fn with_transports(
        (main_url, main_transport): (String, Arc<dyn Transport>),
        (ai_url, ai_transport): (String, Arc<dyn Transport>),
        session: Session,
        on_session_expired: Option<SessionExpiredHook>,
    ) -> Result<Self, ApiError> {
        let refresher: Arc<dyn TokenRefresher> = Arc::new(HttpTokenRefresher::new(
            main_transport.clone(),
            session.clone(),
        ));

        let build = |name: &str, url: String, transport: Arc<dyn Transport>| {
            let mut builder = ApiClient::builder(url)
                .name(name)
                .public_paths(PublicPaths::default())
                .transport(transport)
                .refresher(refresher.clone())
                .session(session.clone());
            if let Some(hook) = &on_session_expired {
                builder = builder.on_session_expired(hook.clone());
            }
            builder.build()
        };

        Ok(Self {
            api: build("api", main_url, main_transport)?,
            tutor: build("tutor", ai_url, ai_transport)?,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.api.session()
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.api)
    }

    #[must_use]
    pub fn courses(&self) -> CourseService<'_> {
        CourseService::new(&self.api)
    }

    #[must_use]
    pub fn topics(&self) -> TopicService<'_> {
        TopicService::new(&self.api)
    }

    #[must_use]
    pub fn forum(&self) -> ForumService<'_> {
        ForumService::new(&self.api)
    }

    #[must_use]
    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.api)
    }

    #[must_use]
    pub fn learning_paths(&self) -> LearningPathService<'_> {
        LearningPathService::new(&self.api)
    }

    #[must_use]
    pub fn roadmaps(&self) -> RoadmapService<'_> {
        RoadmapService::new(&self.api)
    }

    #[must_use]
    pub fn admin(&self) -> AdminService<'_> {
        AdminService::new(&self.api)
    }

    #[must_use]
    pub fn tutor(&self) -> TutorService<'_> {
        TutorService::new(&self.tutor)
    }
}
