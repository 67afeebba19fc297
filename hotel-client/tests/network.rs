// hotel-client/tests/network.rs
// NetworkHttpClient over a real socket

mod common;

use std::sync::Arc;

use common::{StubApi, banner};
use hotel_client::models::{Banner, BannerCreate};
use hotel_client::{
    AssetKind, ClientConfig, ClientError, Direction, NetworkHttpClient, OrderedList,
    RecordingNotifier, UploadFile, Uploader,
};

async fn serve(stub: &StubApi) -> NetworkHttpClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = stub.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ClientConfig::new(format!("http://{addr}/"))
        .with_timeout(5)
        .with_token("admin-token")
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn test_list_and_move_over_http() {
    let stub = StubApi::new();
    stub.seed(
        "banners",
        vec![banner("a", "Summer offer", 1, true), banner("b", "Spa weekend", 2, true)],
    );
    let client = serve(&stub).await;
    let list: OrderedList<_, Banner> = OrderedList::new(client);

    let items = list.refresh().await.unwrap();
    assert_eq!(items.len(), 2);

    list.move_item("a", Direction::Down).await.unwrap();
    let titles: Vec<String> = list.items().await.into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Spa weekend", "Summer offer"]);
}

#[tokio::test]
async fn test_server_error_body_over_http() {
    let stub = StubApi::new();
    stub.seed("banners", vec![banner("a", "Summer offer", 1, true)]);
    let client = serve(&stub).await;
    let notifier = RecordingNotifier::new();
    let list: OrderedList<_, Banner> =
        OrderedList::new(client).with_notifier(Arc::new(notifier.clone()));

    let form = BannerCreate {
        title: "Summer offer".into(),
        images: vec!["https://cdn.test/x.jpg".into()],
        ..Default::default()
    };
    let err = list.create(&form).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(
        notifier.errors(),
        vec!["A banner with this title already exists".to_string()]
    );
}

#[tokio::test]
async fn test_multipart_upload_over_http() {
    let stub = StubApi::new();
    let client = serve(&stub).await;
    let uploader = Uploader::new(client);

    let url = uploader
        .upload(
            &UploadFile::new("terrace.webp", vec![7; 512]),
            &AssetKind::Restaurant.into(),
        )
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.test/hotel/restaurants/terrace.webp");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let list: OrderedList<_, Banner> = OrderedList::new(client);

    let err = list.refresh().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.user_message(), "Something went wrong, please try again");
}
