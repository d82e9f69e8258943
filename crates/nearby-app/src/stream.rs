use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

/// Waits for the next snapshot on an optional change-stream subscription.
///
/// Pends forever when there is no subscription or the sender is gone, so it
/// can sit in a `select!` next to other sources. A lagged receiver skips to
/// the newest queued snapshot; each snapshot is a full state, so the dropped
/// ones need no replay.
pub(crate) async fn recv_snapshot<T: Clone>(rx: &mut Option<broadcast::Receiver<T>>) -> T {
    let Some(rx) = rx else {
        return std::future::pending().await;
    };

    loop {
        match rx.recv().await {
            Ok(value) => return value,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "change stream lagged; skipping to newest snapshot");
                if let Some(newest) = newest_queued(rx) {
                    return newest;
                }
            }
            Err(RecvError::Closed) => return std::future::pending().await,
        }
    }
}

/// Takes every snapshot already queued on `rx`, oldest first.
///
/// After a lag only the newest snapshot is returned.
pub(crate) fn drain_pending<T: Clone>(rx: &mut Option<broadcast::Receiver<T>>) -> Vec<T> {
    let mut pending = Vec::new();
    let Some(rx) = rx.as_mut() else {
        return pending;
    };
    let mut lagged = false;
    loop {
        match rx.try_recv() {
            Ok(value) => pending.push(value),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "change stream lagged; keeping newest snapshot");
                lagged = true;
            }
            Err(_) => break,
        }
    }
    if lagged && pending.len() > 1 {
        pending.drain(..pending.len() - 1);
    }
    pending
}

fn newest_queued<T: Clone>(rx: &mut broadcast::Receiver<T>) -> Option<T> {
    let mut newest = None;
    loop {
        match rx.try_recv() {
            Ok(value) => newest = Some(value),
            Err(TryRecvError::Lagged(_)) => {}
            Err(_) => return newest,
        }
    }
}

#[cfg(test)]
mod tests {
    use nearby_core::constants::CHANGE_STREAM_CAPACITY;

    use super::*;

    #[tokio::test]
    async fn lagged_receiver_skips_to_newest_snapshot() {
        let (tx, rx) = broadcast::channel(CHANGE_STREAM_CAPACITY);
        let mut rx = Some(rx);
        let last = CHANGE_STREAM_CAPACITY + 5;
        for n in 0..=last {
            tx.send(n).unwrap();
        }

        assert_eq!(recv_snapshot(&mut rx).await, last);
        assert!(drain_pending(&mut rx).is_empty());
    }

    #[test]
    fn drain_after_lag_keeps_only_newest() {
        let (tx, rx) = broadcast::channel(CHANGE_STREAM_CAPACITY);
        let mut rx = Some(rx);
        let last = CHANGE_STREAM_CAPACITY + 5;
        for n in 0..=last {
            tx.send(n).unwrap();
        }

        assert_eq!(drain_pending(&mut rx), vec![last]);
    }

    #[test]
    fn drain_without_lag_returns_all_in_order() {
        let (tx, rx) = broadcast::channel(CHANGE_STREAM_CAPACITY);
        let mut rx = Some(rx);
        for n in 0..3 {
            tx.send(n).unwrap();
        }

        assert_eq!(drain_pending(&mut rx), vec![0, 1, 2]);
    }
}
