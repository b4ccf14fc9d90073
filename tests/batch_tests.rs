//! Publish and delete batches keep going past individual failures

use mockito::{Matcher, Server};
use url::Url;

use cami_zenodo::batch::{run_batch, BatchAction};
use cami_zenodo::deposit_log::parse_deposition_ids;
use cami_zenodo::zenodo::{DepositionId, ZenodoClient};

fn token() -> Matcher {
    Matcher::UrlEncoded("access_token".into(), "token".into())
}

fn client(server: &Server) -> ZenodoClient {
    ZenodoClient::with_base_url(Url::parse(&server.url()).unwrap(), "token").unwrap()
}

#[tokio::test]
async fn publish_attempts_every_id() {
    //* Given
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for (id, status) in [(11, 202), (12, 500), (13, 202)] {
        let mock = server
            .mock("POST", format!("/api/deposit/depositions/{id}/actions/publish").as_str())
            .match_query(token())
            .with_status(status)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }
    let ids = parse_deposition_ids("11\n12\n13\n").unwrap();

    //* When
    let outcomes = run_batch(&client(&server), BatchAction::Publish, &ids).await;

    //* Then
    for mock in &mocks {
        mock.assert_async().await;
    }
    let succeeded: Vec<(DepositionId, bool)> = outcomes.iter().map(|o| (o.id, o.succeeded())).collect();
    assert_eq!(
        succeeded,
        vec![(DepositionId(11), true), (DepositionId(12), false), (DepositionId(13), true)]
    );
    assert_eq!(outcomes[1].result.as_ref().unwrap_err().status(), Some(500));
}

#[tokio::test]
async fn delete_attempts_every_id() {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for (id, status, body) in [
        (21, 204, ""),
        (22, 403, r#"{"message": "Deposition is published"}"#),
        (23, 204, ""),
    ] {
        let mock = server
            .mock("DELETE", format!("/api/deposit/depositions/{id}").as_str())
            .match_query(token())
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }
    let ids = vec![DepositionId(21), DepositionId(22), DepositionId(23)];

    let outcomes = run_batch(&client(&server), BatchAction::Delete, &ids).await;

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert!(outcomes[0].succeeded());
    assert!(outcomes[2].succeeded());
    let err = outcomes[1].result.as_ref().unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("Deposition is published"));
}

#[tokio::test]
async fn empty_batch_sends_nothing() {
    let server = Server::new_async().await;
    let outcomes = run_batch(&client(&server), BatchAction::Delete, &[]).await;
    assert!(outcomes.is_empty());
}
