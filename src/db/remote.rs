//! Client for a graph store reached through its HTTP gateway.
//!
//! Transactions are server-side: one is opened with `POST /kb/<ks>/tx`,
//! queried and committed by id, and deleted if dropped before commit.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{Session, Transaction};
use crate::error::{MigrateError, MigrateResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct OpenedTransaction {
    id: String,
}

/// Connection to a graph store. Holds the HTTP agent shared by its sessions.
pub struct GraphClient {
    base_url: String,
    agent: ureq::Agent,
}

impl GraphClient {
    /// `uri` may omit the scheme, as in `localhost:48555`.
    pub fn new(uri: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            base_url: base_url(uri),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Opens a session on `keyspace`, creating the keyspace if needed.
    pub fn session(&self, keyspace: &str) -> MigrateResult<RemoteSession<'_>> {
        let url = format!("{}/kb/{}", self.base_url, keyspace);
        self.agent.put(&url).call().map_err(map_error)?;
        debug!(url = %url, "opened session");

        Ok(RemoteSession {
            client: self,
            keyspace: keyspace.to_string(),
        })
    }
}

pub struct RemoteSession<'c> {
    client: &'c GraphClient,
    keyspace: String,
}

impl RemoteSession<'_> {
    fn url(&self, path: &str) -> String {
        format!("{}/kb/{}/{}", self.client.base_url, self.keyspace, path)
    }
}

impl Session for RemoteSession<'_> {
    fn keyspace(&self) -> &str {
        &self.keyspace
    }

    fn transaction(&mut self) -> MigrateResult<Box<dyn Transaction + '_>> {
        let response = self
            .client
            .agent
            .post(&self.url("tx"))
            .send_json(serde_json::json!({ "type": "write" }))
            .map_err(map_error)?;
        let body = response.into_string()?;
        let opened: OpenedTransaction = serde_json::from_str(&body)?;
        debug!(tx = %opened.id, "opened write transaction");

        Ok(Box::new(RemoteTransaction {
            agent: &self.client.agent,
            url: self.url(&format!("tx/{}", opened.id)),
            committed: false,
        }))
    }
}

impl Drop for RemoteSession<'_> {
    fn drop(&mut self) {
        debug!(keyspace = %self.keyspace, "closed session");
    }
}

pub struct RemoteTransaction<'a> {
    agent: &'a ureq::Agent,
    url: String,
    committed: bool,
}

impl Transaction for RemoteTransaction<'_> {
    fn query(&mut self, query: &str) -> MigrateResult<()> {
        self.agent
            .post(&format!("{}/query", self.url))
            .send_json(serde_json::json!({ "query": query }))
            .map_err(map_error)?;
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> MigrateResult<()> {
        self.agent
            .post(&format!("{}/commit", self.url))
            .call()
            .map_err(map_error)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for RemoteTransaction<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.agent.delete(&self.url).call() {
            warn!(url = %self.url, error = %map_error(e), "failed to close transaction");
        }
    }
}

fn base_url(uri: &str) -> String {
    let uri = uri.trim().trim_end_matches('/');
    if uri.contains("://") {
        uri.to_string()
    } else {
        format!("http://{}", uri)
    }
}

fn map_error(e: ureq::Error) -> MigrateError {
    match e {
        ureq::Error::Status(status, resp) => {
            let body = resp.into_string().unwrap_or_default();
            let message = body.chars().take(MAX_ERROR_BODY).collect();
            MigrateError::Query { status, message }
        }
        ureq::Error::Transport(t) => MigrateError::Connection(t.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_port_gets_http_scheme() {
        assert_eq!(base_url("localhost:48555"), "http://localhost:48555");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(base_url("https://graph.example.com/"), "https://graph.example.com");
    }

    #[test]
    fn client_normalizes_uri() {
        let client = GraphClient::new(" localhost:48555/ ");
        assert_eq!(client.base_url(), "http://localhost:48555");
    }

    #[test]
    fn unreachable_server_is_connection_error() {
        // Port 1 is reserved and nothing listens on it.
        let client = GraphClient::new("127.0.0.1:1");
        assert!(matches!(
            client.session("phone_calls"),
            Err(MigrateError::Connection(_))
        ));
    }
}
