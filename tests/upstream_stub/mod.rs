use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::json;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum UpstreamBehavior {
    /// One page titled `title` whose latest revision is `content`.
    Article {
        title: &'static str,
        content: &'static str,
    },
    /// One page flagged `missing`.
    Missing { title: &'static str },
    /// Answer every query with this body verbatim.
    Body(&'static str),
    /// Sleep before answering with an empty page list.
    Delay(Duration),
}

/// Local stand-in for the encyclopedia query API at `{endpoint}`.
pub struct UpstreamStub {
    pub endpoint: String,
    titles: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[allow(dead_code)]
impl UpstreamStub {
    pub fn spawn(behavior: UpstreamBehavior) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start upstream stub server");
        let addr = server.server_addr();
        let endpoint = format!("http://{addr}/w/api.php");

        let titles = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&titles);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let Ok(url) = url::Url::parse(&format!("http://stub{}", request.url())) else {
                    let _ = request.respond(
                        tiny_http::Response::from_string("bad url").with_status_code(400),
                    );
                    continue;
                };
                if request.method() != &tiny_http::Method::Get || url.path() != "/w/api.php" {
                    let _ = request.respond(
                        tiny_http::Response::from_string("not found").with_status_code(404),
                    );
                    continue;
                }

                let title = url
                    .query_pairs()
                    .find(|(key, _)| key == "titles")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                seen.lock().expect("titles lock").push(title);

                let body = match &behavior {
                    UpstreamBehavior::Article { title, content } => json!({
                        "batchcomplete": true,
                        "query": {
                            "pages": [{
                                "pageid": 1,
                                "ns": 0,
                                "title": title,
                                "revisions": [{
                                    "contentformat": "text/x-wiki",
                                    "contentmodel": "wikitext",
                                    "content": content,
                                }],
                            }],
                        },
                    })
                    .to_string(),
                    UpstreamBehavior::Missing { title } => json!({
                        "batchcomplete": true,
                        "query": {
                            "pages": [{ "ns": 0, "title": title, "missing": true }],
                        },
                    })
                    .to_string(),
                    UpstreamBehavior::Body(body) => (*body).to_owned(),
                    UpstreamBehavior::Delay(delay) => {
                        thread::sleep(*delay);
                        json!({ "query": { "pages": [] } }).to_string()
                    }
                };

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("build header");
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(200)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            endpoint,
            titles,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requested_titles(&self) -> Vec<String> {
        self.titles.lock().expect("titles lock").clone()
    }
}

impl Drop for UpstreamStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
