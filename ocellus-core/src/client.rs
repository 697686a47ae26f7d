//! Request/response orchestration
//!
//! [`Lens`] owns the transport, the clock, the frame parser and the result
//! store. Each public operation is one complete transaction:
//!
//! ```text
//! IDLE → SENT → AWAIT_METADATA → AWAIT_RECORD[0..n) → DONE
//!                     │                  │
//!                     └──────────────────┴──→ FAILED (timeout / bad record)
//! ```
//!
//! Simple commands stop after a single acknowledgement. Nothing carries over
//! between calls except the last successful result set.

use core::mem;

use ocellus_hal::{Clock, Transport};
use ocellus_protocol::{
    cmd, Algorithm, ExpectedReply, Frame, FrameParser, Metadata, Query, Record, Reply, Request,
};

use crate::config::LensConfig;
use crate::error::LensError;
use crate::store::ResultStore;

/// Host-side driver for one vision sensor
#[derive(Debug)]
pub struct Lens<T, C> {
    transport: T,
    clock: C,
    config: LensConfig,
    parser: FrameParser,
    /// Last committed generation
    results: ResultStore,
    /// Generation being filled by the running cycle
    staging: ResultStore,
}

impl<T: Transport, C: Clock> Lens<T, C> {
    /// Create a driver with the default configuration
    pub fn new(transport: T, clock: C) -> Self {
        Self::with_config(transport, clock, LensConfig::default())
    }

    /// Create a driver with an explicit configuration
    pub fn with_config(transport: T, clock: C, config: LensConfig) -> Self {
        Self {
            transport,
            clock,
            config,
            parser: FrameParser::new(),
            results: ResultStore::new(),
            staging: ResultStore::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// Change the per-wait timeout
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.config.timeout_ms = timeout_ms;
    }

    /// Records of the last successful enumerate cycle
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Read the next record of the current result set
    pub fn read(&mut self) -> Record {
        self.results.read()
    }

    /// Learned ID count reported by the last successful cycle
    pub fn knowledge_size(&self) -> u16 {
        self.results.metadata().knowledge_size
    }

    /// Sensor frame counter reported by the last successful cycle
    pub fn frame_number(&self) -> u16 {
        self.results.metadata().frame_number
    }

    /// Give the transport and clock back
    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    // Handshake

    /// Knock until the sensor acknowledges or the attempts run out
    pub fn connect(&mut self) -> Result<(), LensError> {
        for attempt in 1..=self.config.knock_attempts {
            match self.command(&Request::Knock) {
                Ok(()) => {
                    info!("Sensor answered knock {}", attempt);
                    return Ok(());
                }
                Err(e) => {
                    debug!("Knock {} failed: {:?}", attempt, e);
                }
            }
        }

        warn!(
            "No answer after {} knocks",
            self.config.knock_attempts
        );
        Err(LensError::HandshakeFailed)
    }

    // Enumerate cycles

    /// Fetch every block and arrow
    pub fn request(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::All)
    }

    /// Fetch blocks only
    pub fn request_blocks(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::Blocks)
    }

    /// Fetch arrows only
    pub fn request_arrows(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::Arrows)
    }

    /// Fetch learned objects only
    pub fn request_learned(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::Learned)
    }

    /// Fetch learned blocks only
    pub fn request_blocks_learned(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::BlocksLearned)
    }

    /// Fetch learned arrows only
    pub fn request_arrows_learned(&mut self) -> Result<(), LensError> {
        self.enumerate(Query::ArrowsLearned)
    }

    /// Fetch records with this ID
    pub fn request_by_id(&mut self, id: u16) -> Result<(), LensError> {
        self.enumerate(Query::ById(id))
    }

    /// Fetch blocks with this ID
    pub fn request_blocks_by_id(&mut self, id: u16) -> Result<(), LensError> {
        self.enumerate(Query::BlocksById(id))
    }

    /// Fetch arrows with this ID
    pub fn request_arrows_by_id(&mut self, id: u16) -> Result<(), LensError> {
        self.enumerate(Query::ArrowsById(id))
    }

    /// Run one enumerate cycle
    ///
    /// On success the result store is replaced in full and its cursor reset.
    /// On any failure the previous result set stays exactly as it was.
    /// Records are stored as received; filtering by ID is the sensor's job.
    pub fn enumerate(&mut self, query: Query) -> Result<(), LensError> {
        self.transact(&Request::Enumerate(query))?;
        Ok(())
    }

    /// Read the metadata frame and the records it announces, then commit
    fn collect_records(&mut self) -> Result<Metadata, LensError> {
        let frame = self.receive(Some(cmd::RETURN_INFO))?;
        let info = match Reply::from_frame(&frame)? {
            Reply::Info(info) => info,
            _ => return Err(LensError::UnexpectedReply(frame.command)),
        };
        trace!(
            "Info: {} records, {} learned, frame {}",
            info.protocol_size,
            info.knowledge_size,
            info.frame_number
        );

        let expected = usize::from(info.protocol_size);
        self.staging.clear();
        self.staging
            .reserve(expected)
            .map_err(|_| LensError::OutOfMemory)?;

        for index in 0..expected {
            let frame = self.receive(None)?;
            let record = match Reply::from_frame(&frame) {
                Ok(Reply::Block(block)) => Record::Block(block),
                Ok(Reply::Arrow(arrow)) => Record::Arrow(arrow),
                _ => {
                    warn!(
                        "Record {} of {} has command {=u8:#x}",
                        index,
                        expected,
                        frame.command
                    );
                    return Err(LensError::UnexpectedReply(frame.command));
                }
            };
            self.staging.push(record);
        }

        self.staging.set_metadata(info);
        mem::swap(&mut self.results, &mut self.staging);
        self.results.reset_cursor();
        Ok(info)
    }

    // Simple commands

    /// Switch the active vision algorithm
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), LensError> {
        self.command(&Request::SetAlgorithm(algorithm))
    }

    /// Learn the object currently in view as `id`
    pub fn learn(&mut self, id: u16) -> Result<(), LensError> {
        self.command(&Request::Learn(id))
    }

    /// Forget everything the current algorithm has learned
    pub fn forget(&mut self) -> Result<(), LensError> {
        self.command(&Request::Forget)
    }

    /// Show `name` for learned ID `id` on the sensor screen
    ///
    /// Names longer than 20 bytes are rejected before anything is sent.
    pub fn set_custom_name(&mut self, name: &str, id: u8) -> Result<(), LensError> {
        self.command(&Request::SetCustomName { id, name })
    }

    /// Draw `text` at (`x`, `y`) on the sensor screen
    ///
    /// Text longer than 20 bytes is rejected before anything is sent;
    /// coordinates past the screen edge are clamped.
    pub fn set_custom_text(&mut self, text: &str, x: u16, y: u8) -> Result<(), LensError> {
        self.command(&Request::SetCustomText { x, y, text })
    }

    /// Remove all custom text from the sensor screen
    pub fn clear_text(&mut self) -> Result<(), LensError> {
        self.command(&Request::ClearText)
    }

    /// Save a camera photo to the SD card
    pub fn take_photo(&mut self) -> Result<(), LensError> {
        self.command(&Request::TakePhoto)
    }

    /// Save a screenshot to the SD card
    pub fn save_screenshot(&mut self) -> Result<(), LensError> {
        self.command(&Request::SaveScreenshot)
    }

    /// Save the current model to SD card slot `slot`
    pub fn save_model(&mut self, slot: u16) -> Result<(), LensError> {
        self.command(&Request::SaveModel(slot))
    }

    /// Load a model from SD card slot `slot`
    pub fn load_model(&mut self, slot: u16) -> Result<(), LensError> {
        self.command(&Request::LoadModel(slot))
    }

    /// Send the firmware version the host was built against
    pub fn check_firmware_version(&mut self, version: &str) -> Result<(), LensError> {
        self.command(&Request::FirmwareVersion(version))
    }

    /// Ask whether the sensor is the Pro model
    pub fn is_pro(&mut self) -> Result<bool, LensError> {
        let request = Request::IsPro;
        match self.transact(&request)? {
            Reply::IsPro(pro) => Ok(pro),
            _ => Err(LensError::UnexpectedReply(request.code())),
        }
    }

    // Dispatch

    /// Send a request and collect whatever its catalog row says comes back
    ///
    /// Returns `Reply::Ack` for acknowledged commands, the cycle header for
    /// enumerate requests and the decoded answer for flag queries.
    fn transact(&mut self, request: &Request<'_>) -> Result<Reply, LensError> {
        self.send(request)?;

        match request.expected_reply() {
            ExpectedReply::Ack => {
                self.receive(Some(cmd::RETURN_OK))?;
                Ok(Reply::Ack)
            }
            ExpectedReply::Enumeration => self.collect_records().map(Reply::Info),
            ExpectedReply::Flag => {
                let frame = self.receive(Some(request.code()))?;
                Ok(Reply::from_frame(&frame)?)
            }
        }
    }

    // Wait primitive

    /// Wait for one complete frame
    ///
    /// With `expected` set, frames carrying any other command are skipped,
    /// except `RETURN_NEED_PRO` which fails the wait at once. Gives up with
    /// [`LensError::Timeout`] once more than `timeout_ms` has elapsed.
    pub fn receive(&mut self, expected: Option<u8>) -> Result<Frame, LensError> {
        let start = self.clock.now_ms();
        let timeout = u64::from(self.config.timeout_ms);

        loop {
            if let Some(frame) = self.poll_frame()? {
                match expected {
                    None => return Ok(frame),
                    Some(code) if frame.command == code => return Ok(frame),
                    Some(_) if frame.command == cmd::RETURN_NEED_PRO => {
                        return Err(LensError::NeedPro)
                    }
                    Some(code) => {
                        trace!(
                            "Skipping {=u8:#x} while waiting for {=u8:#x}",
                            frame.command,
                            code
                        );
                    }
                }
            }

            if self.clock.elapsed_ms(start) > timeout {
                debug!("Timed out waiting for {:?}", expected);
                return Err(LensError::Timeout);
            }
        }
    }

    /// Feed what the transport has right now into the parser
    ///
    /// Reads at most the count reported up front so a chattering line
    /// cannot starve the deadline check.
    fn poll_frame(&mut self) -> Result<Option<Frame>, LensError> {
        let available = self.transport.bytes_available()?;

        for _ in 0..available {
            let Some(byte) = self.transport.read_byte()? else {
                break;
            };
            match self.parser.feed(byte) {
                Ok(Some(frame)) => return Ok(Some(frame)),
                Ok(None) => {}
                Err(e) => warn!("Frame dropped: {:?}", e),
            }
        }

        Ok(None)
    }

    /// Run a request whose answer carries nothing beyond success
    fn command(&mut self, request: &Request<'_>) -> Result<(), LensError> {
        self.transact(request)?;
        Ok(())
    }

    /// Encode and transmit a request
    ///
    /// Encoding happens first, so a request that fails validation never
    /// touches the transport.
    fn send(&mut self, request: &Request<'_>) -> Result<(), LensError> {
        let bytes = request.to_frame()?.encode_to_vec()?;
        self.parser.reset();
        self.transport.write(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{replies, wire, ManualClock, ScriptedTransport};
    use ocellus_protocol::{Arrow, Block, FrameError, Metadata};

    fn info(protocol_size: u16) -> Reply {
        Reply::Info(Metadata {
            protocol_size,
            knowledge_size: 1,
            frame_number: 7,
        })
    }

    fn block(id: u16) -> Block {
        Block {
            x_center: 160,
            y_center: 120,
            width: 32,
            height: 24,
            id,
        }
    }

    fn arrow(id: u16) -> Arrow {
        Arrow {
            x_origin: 10,
            y_origin: 200,
            x_target: 150,
            y_target: 20,
            id,
        }
    }

    fn request_bytes(request: Request<'_>) -> Vec<u8> {
        wire(&request.to_frame().unwrap())
    }

    #[test]
    fn test_connect_first_knock() {
        let transport = ScriptedTransport::new().respond(replies(&[Reply::Ack]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.connect(), Ok(()));
        let (transport, _) = lens.release();
        assert_eq!(transport.written, [request_bytes(Request::Knock)]);
    }

    #[test]
    fn test_connect_retries_until_ack() {
        let transport = ScriptedTransport::new()
            .silent()
            .silent()
            .respond(replies(&[Reply::Ack]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.connect(), Ok(()));
        assert_eq!(lens.release().0.written.len(), 3);
    }

    #[test]
    fn test_connect_gives_up_after_five_knocks() {
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(ScriptedTransport::new(), &clock);

        assert_eq!(lens.connect(), Err(LensError::HandshakeFailed));
        assert_eq!(lens.release().0.written.len(), 5);
    }

    #[test]
    fn test_request_block_and_arrow() {
        let transport = ScriptedTransport::new().respond(replies(&[
            info(2),
            Reply::Block(block(0)),
            Reply::Arrow(arrow(1)),
        ]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.request(), Ok(()));
        let results = lens.results();
        assert_eq!(results.count(), 2);
        assert_eq!(results.count_blocks(), 1);
        assert_eq!(results.count_arrows(), 1);
        assert_eq!(results.block(0), Record::Block(block(0)));
        assert_eq!(results.arrow(0), Record::Arrow(arrow(1)));
        assert_eq!(lens.knowledge_size(), 1);
        assert_eq!(lens.frame_number(), 7);
        assert_eq!(lens.release().0.written, [request_bytes(Request::Enumerate(Query::All))]);
    }

    #[test]
    fn test_cycle_length_matches_metadata() {
        let transport = ScriptedTransport::new().respond(replies(&[
            info(4),
            Reply::Block(block(1)),
            Reply::Block(block(2)),
            Reply::Arrow(arrow(0)),
            Reply::Block(block(0)),
        ]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.request().unwrap();
        assert_eq!(lens.results().count(), 4);
        assert_eq!(lens.results().metadata().protocol_size, 4);
    }

    #[test]
    fn test_empty_result_set() {
        let transport = ScriptedTransport::new().respond(replies(&[info(0)]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.request_blocks(), Ok(()));
        assert!(lens.results().is_empty());
        assert_eq!(lens.read(), Record::Invalid);
    }

    #[test]
    fn test_timeout_keeps_previous_generation() {
        let transport = ScriptedTransport::new()
            .respond(replies(&[info(1), Reply::Block(block(3))]))
            .silent();
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.request().unwrap();
        assert_eq!(lens.request(), Err(LensError::Timeout));
        assert_eq!(lens.results().count(), 1);
        assert_eq!(lens.results().get(0), Record::Block(block(3)));
    }

    #[test]
    fn test_unrecognized_record_aborts_cycle() {
        let transport = ScriptedTransport::new()
            .respond(replies(&[info(1), Reply::Arrow(arrow(5))]))
            .respond(replies(&[
                info(3),
                Reply::Block(block(1)),
                Reply::Ack,
                Reply::Block(block(2)),
            ]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.request().unwrap();
        assert_eq!(lens.request(), Err(LensError::UnexpectedReply(cmd::RETURN_OK)));

        // Earlier generation survives untouched; the partial cycle is discarded
        assert_eq!(lens.results().count(), 1);
        assert_eq!(lens.results().get(0), Record::Arrow(arrow(5)));

        // The cycle stopped right after the bad frame: the trailing block is unread
        let (transport, _) = lens.release();
        assert_eq!(transport.pending(), wire(&Reply::Block(block(2)).to_frame().unwrap()).len());
    }

    #[test]
    fn test_new_generation_resets_cursor() {
        let transport = ScriptedTransport::new()
            .respond(replies(&[info(2), Reply::Block(block(1)), Reply::Block(block(2))]))
            .respond(replies(&[info(1), Reply::Arrow(arrow(9))]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.request().unwrap();
        assert_eq!(lens.read(), Record::Block(block(1)));
        assert_eq!(lens.results().cursor(), 1);

        lens.request_arrows().unwrap();
        assert_eq!(lens.results().cursor(), 0);
        assert_eq!(lens.read(), Record::Arrow(arrow(9)));
        assert_eq!(lens.results().count(), 1);
    }

    #[test]
    fn test_request_by_id_stores_everything_received() {
        // The sensor filters; whatever it sends back is kept as-is
        let transport = ScriptedTransport::new().respond(replies(&[
            info(2),
            Reply::Block(block(2)),
            Reply::Block(block(4)),
        ]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.request_blocks_by_id(2).unwrap();
        assert_eq!(lens.results().count(), 2);
        assert_eq!(lens.results().count_by_id(4), 1);

        let (transport, _) = lens.release();
        let sent = &transport.written[0];
        assert_eq!(sent[4], cmd::REQUEST_BLOCKS_BY_ID);
        assert_eq!(&sent[5..7], &[2, 0]);
    }

    #[test]
    fn test_resyncs_past_line_noise() {
        let mut bytes = vec![0x00, 0x55, 0x13, 0xFF, 0x55, 0x55];
        bytes.extend(replies(&[info(1), Reply::Block(block(1))]));
        let transport = ScriptedTransport::new().respond(bytes);
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.request(), Ok(()));
        assert_eq!(lens.results().count(), 1);
    }

    #[test]
    fn test_cut_off_header_before_metadata() {
        let mut bytes = vec![0x55, 0xAA];
        bytes.extend(replies(&[info(1), Reply::Block(block(2))]));
        let transport = ScriptedTransport::new().respond(bytes);
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.request(), Ok(()));
        assert_eq!(lens.results().get(0), Record::Block(block(2)));
    }

    #[test]
    fn test_wait_skips_other_commands() {
        let transport =
            ScriptedTransport::new().respond(replies(&[Reply::Busy, info(0), Reply::Ack]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.learn(1), Ok(()));
    }

    #[test]
    fn test_need_pro_fails_fast() {
        let transport = ScriptedTransport::new().respond(replies(&[Reply::NeedPro]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.save_model(1), Err(LensError::NeedPro));
        assert!(clock.peek() < 50);
    }

    #[test]
    fn test_timeout_bound() {
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(ScriptedTransport::new(), &clock);

        let start = clock.peek();
        assert_eq!(lens.receive(None), Err(LensError::Timeout));
        let elapsed = clock.peek() - start;

        // Fails only after the budget is spent, and at most one poll late
        assert!(elapsed >= 100, "gave up after {elapsed} ms");
        assert!(elapsed <= 100 + 2, "gave up after {elapsed} ms");
    }

    #[test]
    fn test_configured_timeout() {
        let clock = ManualClock::new(5);
        let config = LensConfig::default().with_timeout_ms(20);
        let mut lens = Lens::with_config(ScriptedTransport::new(), &clock, config);

        assert_eq!(lens.forget(), Err(LensError::Timeout));
        assert!(clock.peek() <= 20 + 2 * 5);

        lens.set_timeout_ms(300);
        assert_eq!(lens.config().timeout_ms, 300);
    }

    #[test]
    fn test_custom_name_too_long_sends_nothing() {
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(ScriptedTransport::new(), &clock);

        let name = "x".repeat(21);
        assert_eq!(
            lens.set_custom_name(&name, 1),
            Err(LensError::Frame(FrameError::TextTooLong))
        );
        assert!(lens.release().0.written.is_empty());
    }

    #[test]
    fn test_custom_text_too_long_sends_nothing() {
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(ScriptedTransport::new(), &clock);

        let text = "x".repeat(21);
        assert_eq!(
            lens.set_custom_text(&text, 10, 5),
            Err(LensError::Frame(FrameError::TextTooLong))
        );
        assert!(lens.release().0.written.is_empty());
    }

    #[test]
    fn test_simple_commands_send_catalog_frames() {
        let mut transport = ScriptedTransport::new();
        for _ in 0..9 {
            transport = transport.respond(replies(&[Reply::Ack]));
        }
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        lens.set_algorithm(Algorithm::ObjectTracking).unwrap();
        lens.learn(2).unwrap();
        lens.forget().unwrap();
        lens.set_custom_name("mug", 2).unwrap();
        lens.set_custom_text("hello", 300, 10).unwrap();
        lens.clear_text().unwrap();
        lens.take_photo().unwrap();
        lens.save_screenshot().unwrap();
        lens.check_firmware_version("0.5.1").unwrap();

        let (transport, _) = lens.release();
        assert_eq!(
            transport.written,
            [
                request_bytes(Request::SetAlgorithm(Algorithm::ObjectTracking)),
                request_bytes(Request::Learn(2)),
                request_bytes(Request::Forget),
                request_bytes(Request::SetCustomName { id: 2, name: "mug" }),
                request_bytes(Request::SetCustomText { x: 300, y: 10, text: "hello" }),
                request_bytes(Request::ClearText),
                request_bytes(Request::TakePhoto),
                request_bytes(Request::SaveScreenshot),
                request_bytes(Request::FirmwareVersion("0.5.1")),
            ]
        );
    }

    #[test]
    fn test_load_model() {
        let transport = ScriptedTransport::new().respond(replies(&[Reply::Ack]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.load_model(3), Ok(()));
        let (transport, _) = lens.release();
        assert_eq!(transport.written, [request_bytes(Request::LoadModel(3))]);
    }

    #[test]
    fn test_is_pro() {
        let transport = ScriptedTransport::new()
            .respond(replies(&[Reply::IsPro(true)]))
            .respond(replies(&[Reply::IsPro(false)]));
        let clock = ManualClock::new(1);
        let mut lens = Lens::new(transport, &clock);

        assert_eq!(lens.is_pro(), Ok(true));
        assert_eq!(lens.is_pro(), Ok(false));

        // One zero field on the wire
        let (transport, _) = lens.release();
        let sent = &transport.written[0];
        assert_eq!(sent[3], 10);
        assert_eq!(sent[4], cmd::REQUEST_IS_PRO);
        assert!(sent[5..15].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_transport_error_propagates() {
        struct Broken;

        impl Transport for Broken {
            fn write(&mut self, _data: &[u8]) -> Result<(), ocellus_hal::TransportError> {
                Err(ocellus_hal::TransportError::Nack)
            }

            fn bytes_available(&mut self) -> Result<usize, ocellus_hal::TransportError> {
                Ok(0)
            }

            fn read_byte(&mut self) -> Result<Option<u8>, ocellus_hal::TransportError> {
                Ok(None)
            }
        }

        let clock = ManualClock::new(1);
        let mut lens = Lens::new(Broken, &clock);
        assert_eq!(
            lens.request(),
            Err(LensError::Transport(ocellus_hal::TransportError::Nack))
        );
        assert_eq!(lens.connect(), Err(LensError::HandshakeFailed));
    }
}
