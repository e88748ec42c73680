use std::sync::Mutex;

use api::{AppState, config::ServerConfig, prepare_database};
use common::{
    database::{DatabaseConfig, init_pool},
    models::{CarUpdate, NewCar, SellRequest, SocialLinks},
};
use storefront::{
    AuthMode, BackOffice, Credentials, HttpShowroom, Notice, Notifier, Outcome, Storefront,
    StorefrontConfig,
};
use tokio::net::TcpListener;

#[derive(Default)]
struct Recorder {
    notices: Mutex<Vec<Notice>>,
}

impl Recorder {
    fn last(&self) -> Option<String> {
        self.notices
            .lock()
            .unwrap()
            .last()
            .map(|n| n.message.clone())
    }
}

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Serve a fresh showroom API and return its `/api` base URL
async fn spawn_api() -> String {
    let config = ServerConfig::default();
    let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
    prepare_database(&pool, &config).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = api::app(AppState::new(pool, config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", address)
}

fn storefront(base: &str) -> Storefront<HttpShowroom, Recorder> {
    let api = HttpShowroom::new(&StorefrontConfig::with_api_base(base)).unwrap();
    Storefront::new(api, Recorder::default())
}

#[tokio::test]
async fn test_register_shop_and_checkout() {
    let base = spawn_api().await;
    let store = storefront(&base);

    assert_eq!(store.check_session().await, Outcome::Completed);
    assert!(store.state().session.is_none());

    assert_eq!(store.add_to_cart("car-1").await, Outcome::NeedsLogin);
    assert!(store.state().auth_prompt_open);

    store.set_auth_mode(AuthMode::Register);
    let outcome = store
        .authenticate(
            AuthMode::Register,
            Credentials::register("Asha", "9876543210", "secret1"),
        )
        .await;
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(store.notifier().last().as_deref(), Some("Registration successful"));
    assert!(!store.state().auth_prompt_open);

    assert_eq!(store.add_to_cart("car-1").await, Outcome::Completed);
    assert_eq!(store.add_to_cart("car-3").await, Outcome::Completed);
    let cart = store.state().cart;
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0].name, "Toyota Corolla");
    assert_eq!(cart[0].price, "₹800000");
    assert_eq!(cart[1].name, "Hyundai Creta");
    assert_eq!(cart[1].image, "🚗");

    assert_eq!(store.remove_from_cart("car-3").await, Outcome::Completed);
    assert_eq!(store.state().cart.len(), 1);

    store.open_cart();
    assert_eq!(store.checkout().await, Outcome::Completed);
    let state = store.state();
    assert!(state.cart.is_empty());
    assert!(!state.cart_open);
    assert_eq!(
        store.notifier().last().as_deref(),
        Some("Checkout successful! Our team will contact you shortly.")
    );

    let profile = store.load_profile().await.unwrap();
    assert_eq!(profile.orders.len(), 1);
    assert_eq!(profile.orders[0].car_id, "car-1");

    assert_eq!(store.add_to_cart("car-1").await, Outcome::Failed);
    assert_eq!(
        store.notifier().last().as_deref(),
        Some("This car is no longer available")
    );
}

#[tokio::test]
async fn test_session_survives_a_new_client_state() {
    let base = spawn_api().await;
    let store = storefront(&base);

    store
        .authenticate(
            AuthMode::Register,
            Credentials::register("Ravi", "9000000001", "secret1"),
        )
        .await;
    store.add_to_cart("car-2").await;

    assert_eq!(store.logout().await, Outcome::Completed);
    assert!(store.state().session.is_none());
    assert!(store.state().cart.is_empty());

    let outcome = store
        .authenticate(AuthMode::Login, Credentials::login("9000000001", "secret1"))
        .await;
    assert_eq!(outcome, Outcome::Completed);
    let cart = store.state().cart;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id, "car-2");
}

#[tokio::test]
async fn test_bad_credentials_surface_server_message() {
    let base = spawn_api().await;
    let store = storefront(&base);
    store.open_auth_prompt();

    let outcome = store
        .authenticate(AuthMode::Login, Credentials::login("9111111111", "secret1"))
        .await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(store.notifier().last().as_deref(), Some("Invalid credentials"));
    assert!(store.state().auth_prompt_open);
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let store = storefront(&format!("http://{}/api", address));

    assert_eq!(store.check_session().await, Outcome::Failed);
    assert!(store.notifier().last().is_none());

    let outcome = store
        .authenticate(AuthMode::Login, Credentials::login("9876543210", "secret1"))
        .await;
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(store.notifier().last().as_deref(), Some("Authentication failed"));

    assert_eq!(store.logout().await, Outcome::Completed);
    assert_eq!(store.notifier().last().as_deref(), Some("Logged out"));
}

#[tokio::test]
async fn test_sell_request_reaches_back_office() {
    let base = spawn_api().await;
    let store = storefront(&base);
    store
        .authenticate(
            AuthMode::Register,
            Credentials::register("Asha", "9876543210", "secret1"),
        )
        .await;

    let outcome = store
        .submit_sell_request(&SellRequest {
            owner_name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            make: "Maruti".to_string(),
            model: "Swift".to_string(),
            year: 2017,
            asking_price: 450000,
            notes: None,
        })
        .await;
    assert_eq!(outcome, Outcome::Completed);

    let api = HttpShowroom::new(&StorefrontConfig::with_api_base(&base)).unwrap();
    let office = BackOffice::new(api, |_: &str| true);
    office.login("admin", "admin123").await.unwrap();

    let requests = office.sell_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    office
        .set_sell_request_status(&requests[0].request_id, "approved")
        .await
        .unwrap();
    assert_eq!(office.stats().await.unwrap().pending_sell_requests, 0);

    let car = office
        .add_car(&NewCar {
            make: "Tata".to_string(),
            model: "Nexon".to_string(),
            price: 950000,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(office.inventory().await.unwrap().len(), 4);
    assert!(office.delete_car(&car.id).await.unwrap());
    assert_eq!(office.inventory().await.unwrap().len(), 3);

    office.logout().await;
    assert!(office.stats().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_back_office_settings_and_directory() {
    let base = spawn_api().await;
    let store = storefront(&base);
    assert_eq!(store.social_links().await, SocialLinks::default());

    let api = HttpShowroom::new(&StorefrontConfig::with_api_base(&base)).unwrap();
    let office = BackOffice::new(api, |_: &str| true);
    office.login("admin", "admin123").await.unwrap();

    let links = SocialLinks {
        whatsapp_url: "https://wa.me/911234567890".to_string(),
        ..Default::default()
    };
    office.save_social_links(&links).await.unwrap();
    assert_eq!(store.social_links().await, links);

    let staff = office.employees().await.unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].username, "admin");

    let err = office
        .update_car("no/such car", &CarUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Update failed"), "Car not found");
}
