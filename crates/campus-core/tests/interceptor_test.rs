// Response interceptor policy tests with recording fakes.

mod common;

use std::sync::{Arc, Mutex};

use campus_core::{Navigator, Notifier, ResponseInterceptor};

use common::{login_as, setup};

#[derive(Default)]
struct Recorder {
    messages: Mutex<Vec<String>>,
    navigations: Mutex<Vec<String>>,
}

impl Notifier for Recorder {
    fn notify(&self, message: &str) {
        self.messages.lock().expect("lock").push(message.to_owned());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, path: &str) {
        self.navigations.lock().expect("lock").push(path.to_owned());
    }
}

fn interceptor_with(session: campus_core::Session) -> (ResponseInterceptor, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let interceptor = ResponseInterceptor::new(
        session,
        Arc::clone(&recorder) as Arc<dyn Notifier>,
        Arc::clone(&recorder) as Arc<dyn Navigator>,
    );
    (interceptor, recorder)
}

#[tokio::test]
async fn success_passes_data_through_unmodified() {
    let (_server, session, _tmp) = setup().await;
    let (interceptor, recorder) = interceptor_with(session);

    let value = interceptor
        .resolve(Ok(vec!["a".to_owned(), "b".to_owned()]))
        .expect("success passes through");
    assert_eq!(value, ["a", "b"]);
    assert!(recorder.messages.lock().expect("lock").is_empty());
    assert!(recorder.navigations.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn business_failure_notifies_once_without_logout() {
    let (server, session, _tmp) = setup().await;
    login_as(&server, &session, &["student"]).await;
    let (interceptor, recorder) = interceptor_with(session.clone());

    let err = interceptor
        .resolve::<()>(Err(campus_api::Error::Api {
            code: 500,
            message: "course is full".into(),
        }))
        .expect_err("failure is rejected");

    assert_eq!(err.user_message(), "course is full");
    assert_eq!(*recorder.messages.lock().expect("lock"), ["course is full"]);
    assert!(recorder.navigations.lock().expect("lock").is_empty());
    // the session survives a business failure
    assert!(session.is_logged_in());
}

#[tokio::test]
async fn authentication_failure_clears_session_and_navigates_once() {
    let (server, session, tmp) = setup().await;
    login_as(&server, &session, &["student"]).await;
    let (interceptor, recorder) = interceptor_with(session.clone());

    let err = interceptor
        .resolve::<()>(Err(campus_api::Error::Authentication {
            message: "token expired".into(),
        }))
        .expect_err("failure is rejected");

    assert!(err.is_unauthenticated());
    assert_eq!(*recorder.messages.lock().expect("lock"), ["token expired"]);
    assert_eq!(*recorder.navigations.lock().expect("lock"), ["/login"]);

    assert!(!session.is_logged_in());
    assert!(session.roles().is_empty());
    assert!(session.client().token().is_none());
    let storage = campus_core::SessionStorage::new(tmp.path());
    assert!(storage.token().expect("read").is_none());
}

#[tokio::test]
async fn http_401_without_message_uses_fallback_text() {
    let (_server, session, _tmp) = setup().await;
    let (interceptor, recorder) = interceptor_with(session);

    interceptor
        .resolve::<()>(Err(campus_api::Error::Http {
            status: 401,
            message: None,
        }))
        .expect_err("failure is rejected");

    assert_eq!(
        *recorder.messages.lock().expect("lock"),
        ["login expired, please sign in again"]
    );
    assert_eq!(*recorder.navigations.lock().expect("lock"), ["/login"]);
}
