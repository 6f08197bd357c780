//! Correlating an action with the `stopped` event it causes.

use crate::events::EventSink;
use crate::pending::PendingResult;
use crate::protocol::StoppedEventBody;

/// Run `action` and return a result that completes with the next `stopped`
/// event delivered to `sink`.
///
/// The interest is registered before `action` runs, so a stop emitted while
/// the action is still executing is not lost. Nothing here waits: the
/// action only has to initiate the server-side work.
///
/// Exactly one stop is expected per call. Calling this again before the
/// returned result completes replaces the interest, and the first result
/// then never completes. There is no built-in deadline; use
/// [`PendingResult::timeout`].
pub fn do_with_caused_event<F>(sink: &EventSink, action: F) -> PendingResult<StoppedEventBody>
where
    F: FnOnce(),
{
    let (completer, pending) = PendingResult::channel();
    sink.register_stopped_interest(Box::new(move |event| completer.succeed(event)));
    action();
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StopReason;
    use std::cell::Cell;
    use std::time::Duration;

    fn stop(reason: StopReason, thread_id: i64) -> StoppedEventBody {
        StoppedEventBody {
            reason,
            description: None,
            thread_id: Some(thread_id),
            all_threads_stopped: None,
            text: None,
        }
    }

    #[tokio::test]
    async fn correlate_completes_with_event_emitted_by_action() {
        let sink = EventSink::new();
        let pending = do_with_caused_event(&sink, || {
            sink.on_stopped(stop(StopReason::Breakpoint, 1));
        });
        let event = pending.await.unwrap();
        assert_eq!(event.reason, StopReason::Breakpoint);
        assert_eq!(event.thread_id, Some(1));
    }

    #[test]
    fn correlate_returns_before_event_arrives() {
        let sink = EventSink::new();
        let ran = Cell::new(false);

        let mut pending = do_with_caused_event(&sink, || ran.set(true));
        assert!(ran.get());
        assert!(pending.try_take().is_none());
        assert!(sink.has_stopped_interest());

        sink.on_stopped(stop(StopReason::Step, 2));
        let event = pending.try_take().unwrap().unwrap();
        assert_eq!(event.thread_id, Some(2));
    }

    #[test]
    fn correlate_later_stop_not_delivered() {
        let sink = EventSink::new();
        let mut pending = do_with_caused_event(&sink, || {});

        sink.on_stopped(stop(StopReason::Step, 1));
        sink.on_stopped(stop(StopReason::Pause, 2));

        let event = pending.try_take().unwrap().unwrap();
        assert_eq!(event.reason, StopReason::Step);
        assert!(!sink.has_stopped_interest());
    }

    #[tokio::test(start_paused = true)]
    async fn correlate_nested_call_orphans_first_result() {
        let sink = EventSink::new();
        let mut first = do_with_caused_event(&sink, || {});
        let second = do_with_caused_event(&sink, || {});

        sink.on_stopped(stop(StopReason::Step, 7));

        assert_eq!(second.await.unwrap().thread_id, Some(7));
        assert!(first.try_take().is_none());
        assert!(first
            .timeout(Duration::from_secs(10), "stopped")
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn correlate_starves_without_stop() {
        let sink = EventSink::new();
        let pending = do_with_caused_event(&sink, || {});
        let err = pending
            .timeout(Duration::from_secs(5), "stopped")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "timed out waiting for stopped");
    }
}
