//! The relay loop: receive, decode, normalize, gate, forward, report.
//!
//! One task owns everything mutable (governor, history, counters), so no
//! locking is needed. The loop has exactly two suspension points: the
//! inbound receive and the report timer. Per-stage results keep the recovery
//! policy visible: a malformed packet or a failed send skips one sample and
//! the loop continues; only a dead inbound socket or cancellation ends it.

use std::time::{Duration, Instant};

use tokio::time::{MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::history::History;
use crate::rate::{RateGovernor, SendRate};
use crate::sink::OrientationSink;
use crate::source::PacketSource;
use crate::types::NormalizedOrientation;
use crate::wire::{PacketLayout, decode_frame};

/// Consecutive receive failures tolerated before the socket is presumed
/// unusable and the relay terminates.
const MAX_CONSECUTIVE_RECV_ERRORS: u32 = 10;

/// What woke the relay this cycle.
enum Cycle {
    Cancelled,
    Report,
    Packet(Result<Vec<u8>>),
}

/// Relay context owning all mutable state for one bridge instance.
pub struct Relay<S, K> {
    source: S,
    sink: K,
    layout: &'static PacketLayout,
    governor: RateGovernor,
    history: History,
    report_every: Duration,
    received: u64,
    malformed: u64,
    forwarded_total: u64,
}

impl<S, K> Relay<S, K>
where
    S: PacketSource,
    K: OrientationSink,
{
    /// Build a relay from validated configuration.
    pub fn new(config: &BridgeConfig, source: S, sink: K) -> Result<Self> {
        let rate = SendRate::per_second(config.send_rate_hz)?;
        Ok(Self {
            source,
            sink,
            layout: config.variant.layout(),
            governor: RateGovernor::new(rate),
            history: History::with_capacity(config.history_capacity),
            report_every: Duration::from_secs(config.report_interval_secs),
            received: 0,
            malformed: 0,
            forwarded_total: 0,
        })
    }

    /// Total packets forwarded since startup.
    pub fn forwarded_total(&self) -> u64 {
        self.forwarded_total
    }

    /// Run until cancelled or the inbound socket dies.
    ///
    /// Cancellation is the graceful path and returns `Ok(())`.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!(layout = self.layout.name, "relay started");

        let mut report =
            interval_at(tokio::time::Instant::now() + self.report_every, self.report_every);
        report.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut recv_errors = 0u32;

        loop {
            // Resolve the cycle event first so the handlers below can borrow
            // the whole context.
            let event = tokio::select! {
                _ = cancel.cancelled() => Cycle::Cancelled,
                _ = report.tick() => Cycle::Report,
                packet = self.source.next_packet() => Cycle::Packet(packet),
            };

            match event {
                Cycle::Cancelled => {
                    info!("shutdown requested, stopping relay");
                    break;
                }
                Cycle::Report => self.emit_report(),
                Cycle::Packet(Ok(bytes)) => {
                    recv_errors = 0;
                    self.process(&bytes).await;
                }
                Cycle::Packet(Err(err)) => {
                    recv_errors += 1;
                    warn!(%err, attempt = recv_errors, "inbound receive failed");
                    if recv_errors >= MAX_CONSECUTIVE_RECV_ERRORS {
                        return Err(err);
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle one received datagram.
    ///
    /// Decode failure skips the packet; everything that decodes is
    /// normalized, then gated, and only admitted samples are sent and
    /// buffered. Send failures are logged and do not unwind the cycle.
    async fn process(&mut self, bytes: &[u8]) {
        self.received += 1;

        let frame = match decode_frame(bytes, self.layout) {
            Ok(frame) => frame,
            Err(err @ BridgeError::MalformedPacket { .. }) => {
                self.malformed += 1;
                warn!(%err, len = bytes.len(), "skipping malformed packet");
                return;
            }
            Err(err) => {
                warn!(%err, "skipping undecodable packet");
                return;
            }
        };

        let orientation = NormalizedOrientation::from_frame(&frame);

        if !self.governor.admit(Instant::now()) {
            return;
        }

        if let Err(err) = self.sink.send(&orientation).await {
            warn!(%err, "downstream send failed, sample dropped on the wire");
        }
        self.history.push(frame, orientation);
        self.forwarded_total += 1;
    }

    /// Emit the periodic diagnostic summary and reset the window counter.
    fn emit_report(&mut self) {
        let sent = self.governor.take_accepted();
        let achieved_hz = sent as f64 / self.report_every.as_secs_f64();

        match self.history.latest() {
            Some(entry) => info!(
                sent,
                achieved_hz,
                received = self.received,
                malformed = self.malformed,
                buffered = self.history.len(),
                up_down = entry.orientation.up_down,
                left_right = entry.orientation.left_right,
                roll = entry.orientation.roll,
                "relay report"
            ),
            None => info!(
                sent,
                received = self.received,
                malformed = self.malformed,
                "relay report (nothing forwarded yet)"
            ),
        }

        debug!(window = ?self.report_every, "report window reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NormalizedOrientation;
    use crate::wire::PacketVariant;
    use std::collections::VecDeque;

    /// Scripted source: yields queued packets, then pends forever.
    struct ScriptedSource {
        packets: VecDeque<Vec<u8>>,
    }

    #[async_trait::async_trait]
    impl PacketSource for ScriptedSource {
        async fn next_packet(&mut self) -> Result<Vec<u8>> {
            match self.packets.pop_front() {
                Some(p) => Ok(p),
                None => std::future::pending().await,
            }
        }
    }

    /// Source that always fails, simulating a dead socket.
    struct BrokenSource;

    #[async_trait::async_trait]
    impl PacketSource for BrokenSource {
        async fn next_packet(&mut self) -> Result<Vec<u8>> {
            Err(BridgeError::transport(
                "udp recv",
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "gone"),
            ))
        }
    }

    /// Sink that records what was forwarded.
    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<NormalizedOrientation>,
    }

    #[async_trait::async_trait]
    impl OrientationSink for &mut RecordingSink {
        async fn send(&mut self, orientation: &NormalizedOrientation) -> Result<()> {
            self.sent.push(*orientation);
            Ok(())
        }
    }

    fn legacy_packet(pitch: f32, yaw: f32, roll: f32) -> Vec<u8> {
        let mut buf = vec![0u8; 61];
        buf[0..8].copy_from_slice(&42.0f64.to_le_bytes());
        buf[20..24].copy_from_slice(&pitch.to_le_bytes());
        buf[24..28].copy_from_slice(&yaw.to_le_bytes());
        buf[28..32].copy_from_slice(&roll.to_le_bytes());
        buf
    }

    fn test_config() -> BridgeConfig {
        let mut config = BridgeConfig::default();
        config.variant = PacketVariant::Legacy;
        config
    }

    async fn run_scripted(
        config: &BridgeConfig,
        packets: Vec<Vec<u8>>,
        sink: &mut RecordingSink,
    ) -> Result<()> {
        let source = ScriptedSource { packets: packets.into() };
        let mut relay = Relay::new(config, source, sink)?;
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            // Give the relay time to drain the script, then stop it.
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });
        relay.run(cancel).await
    }

    #[tokio::test]
    async fn forwards_decoded_and_normalized_sample() {
        let mut sink = RecordingSink::default();
        run_scripted(&test_config(), vec![legacy_packet(90.0, -45.0, 0.0)], &mut sink)
            .await
            .unwrap();

        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].up_down, 0.5);
        assert_eq!(sink.sent[0].left_right, -0.25);
        assert_eq!(sink.sent[0].roll, 0.0);
    }

    #[tokio::test]
    async fn malformed_packet_is_survived_and_next_valid_one_forwarded() {
        let mut sink = RecordingSink::default();
        run_scripted(
            &test_config(),
            vec![vec![0u8; 10], legacy_packet(180.0, 0.0, -180.0)],
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].up_down, 1.0);
        assert_eq!(sink.sent[0].roll, -1.0);
    }

    #[tokio::test]
    async fn burst_is_rate_limited_to_one_send() {
        let mut sink = RecordingSink::default();
        // Five back-to-back packets land well inside one 40ms window.
        let packets = (0..5).map(|_| legacy_packet(90.0, 0.0, 0.0)).collect();
        run_scripted(&test_config(), packets, &mut sink).await.unwrap();

        assert_eq!(sink.sent.len(), 1);
    }

    #[tokio::test]
    async fn dead_socket_terminates_with_transport_error() {
        let mut sink = RecordingSink::default();
        let mut relay = Relay::new(&test_config(), BrokenSource, &mut sink).unwrap();

        let result = relay.run(CancellationToken::new()).await;
        match result {
            Err(BridgeError::Transport { .. }) => {}
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_is_a_clean_exit() {
        let mut sink = RecordingSink::default();
        let source = ScriptedSource { packets: VecDeque::new() };
        let mut relay = Relay::new(&test_config(), source, &mut sink).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        relay.run(cancel).await.unwrap();
        assert_eq!(relay.forwarded_total(), 0);
    }

    #[tokio::test]
    async fn out_of_range_angles_are_forwarded_unclamped() {
        let mut sink = RecordingSink::default();
        run_scripted(&test_config(), vec![legacy_packet(360.0, 270.0, -270.0)], &mut sink)
            .await
            .unwrap();

        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].up_down, 2.0);
        assert_eq!(sink.sent[0].left_right, 1.5);
        assert_eq!(sink.sent[0].roll, -1.5);
    }
}
