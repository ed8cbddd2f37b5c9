use super::*;
use crate::notify::{Notice, NoticeKind};
use crate::notify::mock::RecordingNotifier;
use crate::request::HttpMethod;
use crate::request::mock::MockHttpClient;
use crate::storage::mock::MemoryStore;
use serde_json::json;

const BASE: &str = "http://api.test/api/v1";
const LOGIN_URL: &str = "http://api.test/api/v1/admin/login";
const LOGOUT_URL: &str = "http://api.test/api/v1/admin/logout";

type TestStore = SessionStore<MockHttpClient, Rc<MemoryStore>, Rc<RecordingNotifier>>;

// =========================================================
// 辅助函数
// =========================================================

fn create_store(storage: MemoryStore) -> (TestStore, Rc<MemoryStore>, Rc<RecordingNotifier>) {
    let storage = Rc::new(storage);
    let notifier = Rc::new(RecordingNotifier::new());
    let api = CanteenApi::new(MockHttpClient::new(), BASE);
    let store = SessionStore::new(api, Rc::clone(&storage), Rc::clone(&notifier));
    (store, storage, notifier)
}

fn stored_session() -> MemoryStore {
    MemoryStore::with_entries(&[
        (KEY_ADMIN, r#"{"adminName":"Asha","adminEmail":"asha@example.com"}"#),
        (KEY_ADMIN_ID, "a1"),
        (KEY_ADMIN_TOKEN, "tok-1"),
    ])
}

fn mock_login_ok(store: &TestStore) {
    store.api().client().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({
            "adminInfo": {"adminName": "Ravi", "adminEmail": "ravi@example.com", "role": "admin"},
            "adminId": "a2",
            "adminToken": "tok-2"
        }),
    );
}

fn counting_listener(store: &TestStore) -> Rc<Cell<usize>> {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_| counter.set(counter.get() + 1));
    calls
}

// =========================================================
// restore 测试
// =========================================================

#[test]
fn test_initial_state_is_unresolved() {
    let (store, _, _) = create_store(MemoryStore::new());
    assert!(!store.is_resolved());
    assert!(!store.is_authenticated());
}

#[test]
fn test_restore_without_snapshot_is_unauthenticated() {
    let (store, storage, _) = create_store(MemoryStore::new());
    let state = store.restore();

    assert!(state.resolved);
    assert!(state.session.is_none());
    assert!(storage.is_empty());
    // 不发任何请求
    assert_eq!(store.api().client().request_count(), 0);
}

#[test]
fn test_restore_adopts_stored_identity() {
    let (store, _, _) = create_store(stored_session());
    let state = store.restore();

    let session = state.session.unwrap();
    assert_eq!(session.info.admin_name, "Asha");
    assert_eq!(session.info.admin_email, "asha@example.com");
    assert_eq!(session.admin_id, "a1");
    assert_eq!(session.token, "tok-1");
}

#[test]
fn test_restore_requires_all_keys() {
    let storage = MemoryStore::with_entries(&[
        (KEY_ADMIN, r#"{"adminName":"Asha","adminEmail":"asha@example.com"}"#),
        (KEY_ADMIN_ID, "a1"),
    ]);
    let (store, _, _) = create_store(storage);
    assert!(store.restore().session.is_none());
}

#[test]
fn test_restore_rejects_unparseable_snapshot() {
    let storage = MemoryStore::with_entries(&[
        (KEY_ADMIN, "not json"),
        (KEY_ADMIN_ID, "a1"),
        (KEY_ADMIN_TOKEN, "tok-1"),
    ]);
    let (store, storage, _) = create_store(storage);
    let state = store.restore();

    assert!(state.resolved);
    assert!(state.session.is_none());
    // 恢复从不写存储
    assert_eq!(storage.writes.get(), 0);
}

#[test]
fn test_restore_twice_is_idempotent() {
    let (store, storage, notifier) = create_store(stored_session());
    let calls = counting_listener(&store);

    let first = store.restore();
    let second = store.restore();

    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
    assert_eq!(storage.writes.get(), 0);
    assert!(notifier.notices.borrow().is_empty());
}

// =========================================================
// login 测试
// =========================================================

#[tokio::test]
async fn test_login_success_persists_then_sets_state() {
    let (store, storage, notifier) = create_store(MemoryStore::new());
    store.restore();
    mock_login_ok(&store);

    let session = store.login("ravi@example.com", "pw").await.unwrap();

    assert_eq!(session.admin_id, "a2");
    assert_eq!(store.current(), Some(session.clone()));

    let saved = storage.snapshot();
    assert_eq!(saved.get(KEY_ADMIN_ID).map(String::as_str), Some("a2"));
    assert_eq!(saved.get(KEY_ADMIN_TOKEN).map(String::as_str), Some("tok-2"));
    let info: AdminInfo = serde_json::from_str(&saved[KEY_ADMIN]).unwrap();
    assert_eq!(info, session.info);

    assert_eq!(notifier.count(NoticeKind::Success), 1);
    assert_eq!(notifier.count(NoticeKind::Error), 0);
}

#[tokio::test]
async fn test_login_restores_same_identity_after_reload() {
    let (store, storage, _) = create_store(MemoryStore::new());
    mock_login_ok(&store);
    let session = store.login("ravi@example.com", "pw").await.unwrap();

    // 用同一份存储模拟刷新页面
    let api = CanteenApi::new(MockHttpClient::new(), BASE);
    let reloaded = SessionStore::new(api, Rc::clone(&storage), Rc::new(RecordingNotifier::new()));
    assert_eq!(reloaded.restore().session, Some(session));
}

#[tokio::test]
async fn test_login_notifies_subscribers() {
    let (store, _, _) = create_store(MemoryStore::new());
    mock_login_ok(&store);

    let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated()));

    store.login("ravi@example.com", "pw").await.unwrap();
    assert_eq!(*seen.borrow(), vec![true]);
}

#[tokio::test]
async fn test_login_rejected_leaves_everything_untouched() {
    let (store, storage, notifier) = create_store(MemoryStore::new());
    store.restore();
    store.api().client().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        401,
        json!({"message": "Invalid email or password"}),
    );
    let calls = counting_listener(&store);

    let err = store.login("ravi@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert_eq!(calls.get(), 0);
    assert_eq!(notifier.notices.borrow().len(), 1);
    assert_eq!(
        notifier.last().unwrap(),
        Notice::error("Invalid email or password")
    );
}

#[tokio::test]
async fn test_login_network_failure_emits_one_error() {
    let (store, storage, notifier) = create_store(MemoryStore::new());
    store
        .api()
        .client()
        .mock_network_failure(HttpMethod::Post, LOGIN_URL);

    let err = store.login("ravi@example.com", "pw").await.unwrap_err();

    assert_eq!(err.kind, crate::error::AdminErrorKind::Network);
    assert_eq!(err.user_message(), "Login failed");
    assert!(storage.is_empty());
    assert_eq!(notifier.count(NoticeKind::Error), 1);
}

#[tokio::test]
async fn test_login_malformed_response_is_failure() {
    let (store, storage, notifier) = create_store(MemoryStore::new());
    store.api().client().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({"adminInfo": {"adminName": "Ravi"}}),
    );

    let err = store.login("ravi@example.com", "pw").await.unwrap_err();

    assert_eq!(err.kind, crate::error::AdminErrorKind::Malformed);
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert_eq!(notifier.count(NoticeKind::Error), 1);
}

#[tokio::test]
async fn test_login_with_empty_fields_sends_nothing() {
    let (store, _, notifier) = create_store(MemoryStore::new());

    let err = store.login("  ", "pw").await.unwrap_err();

    assert_eq!(err.kind, crate::error::AdminErrorKind::InvalidInput);
    assert_eq!(store.api().client().request_count(), 0);
    assert_eq!(notifier.count(NoticeKind::Error), 1);
}

#[tokio::test]
async fn test_login_storage_failure_does_not_authenticate() {
    let (store, storage, notifier) = create_store(MemoryStore::new());
    mock_login_ok(&store);
    storage.reject_writes(true);

    let err = store.login("ravi@example.com", "pw").await.unwrap_err();

    assert_eq!(err.kind, crate::error::AdminErrorKind::Storage);
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert_eq!(notifier.count(NoticeKind::Error), 1);
    assert_eq!(notifier.count(NoticeKind::Success), 0);
}

// =========================================================
// logout 测试
// =========================================================

#[tokio::test]
async fn test_logout_clears_storage_and_state() {
    let (store, storage, notifier) = create_store(stored_session());
    store.restore();
    store
        .api()
        .client()
        .mock_response(HttpMethod::Post, LOGOUT_URL, 200, json!({"message": "ok"}));

    store.logout().await;

    assert!(!store.is_authenticated());
    assert!(store.is_resolved());
    assert!(storage.is_empty());
    assert_eq!(notifier.last().unwrap(), Notice::success("Logged out successfully"));
    assert_eq!(store.api().client().requests_to(HttpMethod::Post, LOGOUT_URL).len(), 1);
}

#[tokio::test]
async fn test_logout_clears_even_when_remote_fails() {
    let (store, storage, notifier) = create_store(stored_session());
    store.restore();
    store
        .api()
        .client()
        .mock_network_failure(HttpMethod::Post, LOGOUT_URL);

    store.logout().await;

    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert_eq!(notifier.count(NoticeKind::Error), 0);
    assert_eq!(notifier.count(NoticeKind::Success), 1);
}

#[tokio::test]
async fn test_logout_notifies_subscribers() {
    let (store, _, _) = create_store(stored_session());
    store.restore();
    let calls = counting_listener(&store);

    store.logout().await;
    assert_eq!(calls.get(), 1);
    assert!(!store.state().is_authenticated());
}

// =========================================================
// subscribe 测试
// =========================================================

#[test]
fn test_unsubscribe_stops_notifications() {
    let (store, _, _) = create_store(stored_session());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let id = store.subscribe(move |_| counter.set(counter.get() + 1));
    store.unsubscribe(id);

    store.restore();
    assert_eq!(calls.get(), 0);
}
