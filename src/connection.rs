//! The driver: owns the connection, issues `LOGIN`, and hands out statements.

use std::time::Duration;

use log::{debug, trace};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpSocket;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::protocol::buffer::{ByteReader, ByteWriter};
use crate::protocol::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::protocol::header::{self, LineOutcome};
use crate::protocol::request;
use crate::protocol::types::{ResponseMetadata, ResultType, Row};
use crate::statement::Statement;

/// Parameters needed to open a connection.
///
/// Configuration is constructor arguments only, no config file; the
/// connect deadline defaults to 20 seconds and can be overridden with
/// [`ConnectParams::with_connect_timeout`].
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub connect_timeout: Duration,
}

impl ConnectParams {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

/// Result of `execute`/`query` when no result set is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// The statement affected `row_count` rows (INSERT/UPDATE/DELETE-shaped).
    UpdateCount(u64),
    /// The statement produced a result set of `row_count` rows, now
    /// materialised in the owning [`Statement`]'s row buffer.
    ResultSet { row_count: u64 },
}

/// An open connection to a 4D SQL engine.
///
/// Not safe for concurrent use: every method that issues a request takes
/// `&mut self`, so the borrow checker — not a runtime lock — prevents two
/// requests from being in flight on the same connection at once.
pub struct Connection {
    reader: ByteReader<OwnedReadHalf>,
    writer: ByteWriter<OwnedWriteHalf>,
    command_id: u32,
    closed: bool,
}

impl Connection {
    /// Resolve `params.host` (if not a literal IP), connect within
    /// `params.connect_timeout`, and log in.
    pub async fn connect(params: &ConnectParams) -> Result<Self> {
        let addr = resolve_addr(&params.host, params.port).await?;

        // Allocate the socket as its own step, distinct from the TCP
        // connect handshake, so a file-descriptor-exhaustion-style failure
        // surfaces as `TransportCreationError` rather than being folded
        // into `TransportConnectError`.
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(|e| Error::TransportCreationError {
            message: e.to_string(),
        })?;

        debug!("connecting to {addr}");
        let stream = match timeout(params.connect_timeout, socket.connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(Error::TransportConnectError {
                    host: params.host.clone(),
                    port: params.port,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(Error::ConnectionTimeout {
                    host: params.host.clone(),
                    port: params.port,
                    timeout: params.connect_timeout,
                })
            }
        };

        let (read_half, write_half) = stream.into_split();
        let mut conn = Self {
            reader: ByteReader::new(read_half),
            writer: ByteWriter::new(write_half),
            command_id: 1,
            closed: false,
        };

        conn.login(&params.user, &params.password).await?;
        Ok(conn)
    }

    async fn login(&mut self, user: &str, password: &str) -> Result<()> {
        let frame = request::build_login(self.command_id, user, password);
        debug!("sending LOGIN");
        self.send_frame(&frame).await?;

        let metadata = self.read_header_block().await?;
        if metadata.error {
            return Err(Error::login(
                metadata.error_code.unwrap_or_default(),
                metadata.error_description.unwrap_or_default(),
            ));
        }

        self.command_id += 2;
        Ok(())
    }

    /// Prepare a statement for later execution, reserving the command ids
    /// for both phases of its eventual two-phase execute (`+4`, so the next
    /// odd id after phase 1's is already set aside for phase 2).
    pub async fn prepare(&mut self, sql: &str) -> Result<Statement> {
        self.ensure_open()?;
        let phase1_id = self.command_id;
        let phase2_id = self.command_id + 2;
        self.command_id += 4;
        Ok(Statement::new(sql.to_string(), phase1_id, phase2_id))
    }

    /// Prepare and immediately execute `sql` with no bound arguments,
    /// bumping the command id by `+2` before each phase as it actually
    /// happens (rather than reserving both ids up front as `prepare` does).
    pub async fn query(&mut self, sql: &str) -> Result<(ExecuteOutcome, Vec<Row>)> {
        self.ensure_open()?;

        let phase1_id = self.command_id;
        self.command_id += 2;

        let (outcome, _metadata, phase1_rows) = self.execute_phase_one(sql, phase1_id).await?;
        let (outcome, rows) = match outcome {
            ExecuteOutcome::UpdateCount(_) => (outcome, Vec::new()),
            ExecuteOutcome::ResultSet { row_count: 0 } => (outcome, phase1_rows),
            ExecuteOutcome::ResultSet { row_count } => {
                let phase2_id = self.command_id;
                self.command_id += 2;
                let rows = self.execute_phase_two(sql, phase2_id, row_count).await?;
                (outcome, rows)
            }
        };
        Ok((outcome, rows))
    }

    pub async fn begin_transaction(&mut self) -> Result<()> {
        self.query("START").await.map(|_| ())
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.query("COMMIT").await.map(|_| ())
    }

    pub async fn rollback(&mut self) -> Result<()> {
        self.query("ROLLBACK").await.map(|_| ())
    }

    /// Shut down the write side and mark the connection closed. Idempotent.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        debug!("closing connection");
        self.closed = true;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        Ok(())
    }

    fn next_command_id(&mut self, increment: u32) -> u32 {
        let id = self.command_id;
        self.command_id += increment;
        id
    }

    /// Send `<command_id> CLOSE-STATEMENT` and consume the acknowledgement.
    pub(crate) async fn close_cursor(&mut self, statement_id: u32) -> Result<()> {
        let command_id = self.next_command_id(2);
        let frame = request::build_close_statement(command_id, statement_id);
        self.send_frame(&frame).await?;
        self.read_header_block().await?;
        Ok(())
    }

    /// Run phase 1 (the probe) of a two-phase execute for `sql` at the given
    /// command id.
    ///
    /// For a result-set reply this also decodes the initial page's rows off
    /// the wire (`row_count_sent` of them) so the stream stays in sync; when
    /// `row_count == 0` those rows are the final answer and phase 2 is
    /// skipped entirely, otherwise they're superseded by phase 2's full
    /// fetch and the caller discards them.
    pub(crate) async fn execute_phase_one(
        &mut self,
        sql: &str,
        command_id: u32,
    ) -> Result<(ExecuteOutcome, ResponseMetadata, Vec<Row>)> {
        self.ensure_open()?;
        let frame = request::build_execute_statement(command_id, sql, 1);
        self.send_frame(&frame).await?;

        let metadata = self.read_header_block().await?;
        if metadata.error {
            return Err(Error::statement(
                metadata.error_code.unwrap_or_default(),
                metadata.error_description.unwrap_or_default(),
            ));
        }

        match metadata.result_type() {
            Some(ResultType::UpdateCount) => Ok((
                ExecuteOutcome::UpdateCount(metadata.row_count),
                metadata,
                Vec::new(),
            )),
            Some(ResultType::ResultSet) => {
                let rows = self.read_rows(&metadata, metadata.row_count_sent).await?;
                let row_count = metadata.row_count;
                Ok((ExecuteOutcome::ResultSet { row_count }, metadata, rows))
            }
            None => Err(Error::decode("reply carried no Result-Type header")),
        }
    }

    /// Run phase 2 (the full fetch) of a two-phase execute, decoding the
    /// entire result set into a fresh row buffer.
    pub(crate) async fn execute_phase_two(
        &mut self,
        sql: &str,
        command_id: u32,
        row_count: u64,
    ) -> Result<Vec<Row>> {
        let frame = request::build_execute_statement(command_id, sql, row_count);
        self.send_frame(&frame).await?;

        let metadata = self.read_header_block().await?;
        if metadata.error {
            return Err(Error::statement(
                metadata.error_code.unwrap_or_default(),
                metadata.error_description.unwrap_or_default(),
            ));
        }

        self.read_rows(&metadata, metadata.row_count_sent).await
    }

    async fn send_frame(&mut self, frame: &str) -> Result<()> {
        trace!("-> {frame:?}");
        self.writer.write_all(frame.as_bytes()).await
    }

    /// Read CRLF-terminated lines until the blank-line block terminator,
    /// populating a fresh [`ResponseMetadata`].
    async fn read_header_block(&mut self) -> Result<ResponseMetadata> {
        let mut metadata = ResponseMetadata::new();
        loop {
            let line = self.reader.read_until_crlf().await?;
            let line = String::from_utf8_lossy(&line).into_owned();
            trace!("<- {line:?}");
            if header::parse_line(&line, &mut metadata) == LineOutcome::BlockEnd {
                return Ok(metadata);
            }
        }
    }

    /// Decode `count` rows from the binary payload that follows a header
    /// block, per the shape announced in `metadata`.
    async fn read_rows(&mut self, metadata: &ResponseMetadata, count: u64) -> Result<Vec<Row>> {
        use std::collections::HashMap;
        use std::sync::Arc;

        let column_names = Arc::new(metadata.column_names.clone());
        let any_updateable = metadata.any_updateable();
        let mut rows = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let record_id = if any_updateable {
                self.reader.read_u8().await?; // skip byte
                Some(self.reader.read_u32_le().await?)
            } else {
                None
            };

            let mut values = HashMap::with_capacity(metadata.column_count());
            for (name, type_tag) in metadata.column_names.iter().zip(&metadata.column_types) {
                let flag = self.reader.read_u8().await?;
                match flag {
                    0 => {} // null: no entry, treated as Value::Null on read
                    1 => {
                        let value =
                            crate::protocol::decode::decode_value(type_tag, &mut self.reader)
                                .await?;
                        values.insert(name.clone(), value);
                    }
                    2 => {
                        let code = self.reader.read_u64_le().await?;
                        return Err(Error::decode(format!(
                            "per-value error marker on column '{name}', code {code}"
                        )));
                    }
                    other => {
                        return Err(Error::decode(format!(
                            "unexpected value flag byte {other} on column '{name}'"
                        )))
                    }
                }
            }

            let row = Row::new(column_names.clone(), values);
            rows.push(match record_id {
                Some(id) => row.with_record_id(id),
                None => row,
            });
        }

        Ok(rows)
    }
}

/// Resolve `host:port` to a socket address, going through DNS only when
/// `host` is not already a literal IP address.
async fn resolve_addr(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    if let Ok(ip) = host.parse::<std::net::IpAddr>() {
        return Ok(std::net::SocketAddr::new(ip, port));
    }

    tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| Error::DnsResolutionFailed {
            hostname: host.to_string(),
            message: e.to_string(),
        })?
        .next()
        .ok_or_else(|| Error::DnsResolutionFailed {
            hostname: host.to_string(),
            message: "no addresses returned".to_string(),
        })
}
