// Background fetches for the TUI
//
// The render loop never awaits the network. App queues FetchRequests;
// the event loop hands each one to `dispatch`, which spawns a task that
// performs the call and sends a FetchEvent back over the channel. Each
// event echoes the tag it was issued with (gallery generation, page
// ticket, detail sequence) so App can drop completions for state that has
// since been replaced.

use crate::api::image::Preview;
use crate::api::models::{Artwork, ArtworkId, ArtworkPage};
use crate::api::{ArticClient, FetchError};
use crate::gallery::PageRequest;
use tokio::sync::mpsc;

/// Work App wants done off the render loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Next gallery page for the loader of `generation`
    Page {
        generation: u64,
        request: PageRequest,
    },
    /// Record for the detail view mounted with `seq`
    Detail { seq: u64, id: ArtworkId },
    /// Preview image for the detail view mounted with `seq`
    Preview {
        seq: u64,
        image_id: String,
        width: u32,
    },
}

/// Completed fetch, delivered to the event loop
#[derive(Debug)]
pub enum FetchEvent {
    Page {
        generation: u64,
        request: PageRequest,
        result: Result<ArtworkPage, FetchError>,
    },
    Detail {
        seq: u64,
        result: Result<Option<Artwork>, FetchError>,
    },
    Preview {
        seq: u64,
        result: Result<Preview, FetchError>,
    },
}

/// Spawn the task for one request
///
/// A closed channel means the TUI is shutting down; the result is dropped.
pub fn dispatch(client: &ArticClient, tx: &mpsc::Sender<FetchEvent>, request: FetchRequest) {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let event = match request {
            FetchRequest::Page {
                generation,
                request,
            } => FetchEvent::Page {
                generation,
                request,
                result: client.list_artworks(request.page, request.limit).await,
            },
            FetchRequest::Detail { seq, id } => FetchEvent::Detail {
                seq,
                result: client.get_artwork(id).await,
            },
            FetchRequest::Preview {
                seq,
                image_id,
                width,
            } => FetchEvent::Preview {
                seq,
                result: fetch_preview(&client, &image_id, width).await,
            },
        };

        if tx.send(event).await.is_err() {
            tracing::trace!("Fetch completed after TUI shutdown");
        }
    });
}

/// Download and decode an image; decoding runs on the blocking pool
async fn fetch_preview(
    client: &ArticClient,
    image_id: &str,
    width: u32,
) -> Result<Preview, FetchError> {
    let bytes = client.get_image(image_id, width).await?;

    tokio::task::spawn_blocking(move || Preview::decode(&bytes))
        .await
        .map_err(|e| FetchError::Decode(format!("decoder task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ArticClient {
        ArticClient::new(&ApiConfig {
            api_url: format!("{}/api/v1", server.uri()),
            image_url: format!("{}/iiif/{{image_id}}/{{width}}.jpg", server.uri()),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_page_event_echoes_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/artworks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "pagination": { "current_page": 2, "total_pages": 5 },
                "data": [{ "id": 1, "title": "One", "image_id": "a" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let (tx, mut rx) = mpsc::channel(4);
        let request = PageRequest { page: 2, limit: 12 };

        dispatch(
            &client,
            &tx,
            FetchRequest::Page {
                generation: 7,
                request,
            },
        );

        match rx.recv().await {
            Some(FetchEvent::Page {
                generation,
                request: echoed,
                result,
            }) => {
                assert_eq!(generation, 7);
                assert_eq!(echoed, request);
                assert_eq!(result.unwrap().data.len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_preview_with_bad_bytes_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iiif/abc/200.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a jpeg".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let (tx, mut rx) = mpsc::channel(4);

        dispatch(
            &client,
            &tx,
            FetchRequest::Preview {
                seq: 3,
                image_id: "abc".to_string(),
                width: 200,
            },
        );

        match rx.recv().await {
            Some(FetchEvent::Preview { seq, result }) => {
                assert_eq!(seq, 3);
                assert!(matches!(result, Err(FetchError::Decode(_))));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
