//! Tokio driver for a resize coordinator
//!
//! For hosts that deliver resize events on a channel instead of calling the
//! coordinator directly. The driver forwards every event as a raw resize and
//! sleeps until the settle deadline, so the settled signal fires without the
//! host polling.
//!
//! The coordinator is `!Send`; run the driver on a current-thread runtime or
//! inside a `LocalSet`.
//!
//! ```ignore
//! let (events, driver) = zoombox_core::driver::channel(coordinator.clone());
//! tokio::task::spawn_local(driver.run());
//!
//! // From the host's resize handler:
//! events.send(ResizeEvent::resize(ResizeSource::Viewport)).ok();
//! ```

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use zoombox_platform::ResizeEvent;

use crate::coordinator::ResizeCoordinator;

/// Sending half used by the host to report raw resizes
pub type ResizeSender = mpsc::UnboundedSender<ResizeEvent>;

/// Create a driver for `coordinator` and the sender that feeds it
pub fn channel(coordinator: ResizeCoordinator) -> (ResizeSender, ResizeDriver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        tx,
        ResizeDriver {
            coordinator,
            events: rx,
        },
    )
}

/// Counters reported when a driver stops
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub events: u64,
    pub settles: u64,
}

/// Task that feeds a [`ResizeCoordinator`] from a [`ResizeSender`] channel
///
/// Created by [`channel`]; consumed by [`ResizeDriver::run`].
pub struct ResizeDriver {
    coordinator: ResizeCoordinator,
    events: mpsc::UnboundedReceiver<ResizeEvent>,
}

impl ResizeDriver {
    /// Run until every sender is dropped
    ///
    /// A settle that is pending when the channel closes still fires before
    /// the driver returns. Disposing the coordinator cancels it.
    pub async fn run(mut self) -> DriverStats {
        let mut stats = DriverStats::default();
        let mut open = true;

        loop {
            let deadline = self.coordinator.next_deadline();
            if !open && deadline.is_none() {
                break;
            }
            let wake_at = deadline.map(Instant::from_std).unwrap_or_else(Instant::now);

            tokio::select! {
                event = self.events.recv(), if open => match event {
                    Some(event) => {
                        stats.events += 1;
                        self.coordinator.resize_at(event, Instant::now().into_std());
                    }
                    None => {
                        tracing::debug!("resize channel closed");
                        open = false;
                    }
                },
                () = sleep_until(wake_at), if deadline.is_some() => {
                    if self.coordinator.poll_at(Instant::now().into_std()).is_some() {
                        stats.settles += 1;
                    }
                }
            }
        }

        tracing::debug!(events = stats.events, settles = stats.settles, "resize driver stopped");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::ZoomOptions;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::time::sleep;
    use zoombox_platform::{HeadlessRegion, RegionRef, ResizeSource};

    fn resize() -> ResizeEvent {
        ResizeEvent::resize(ResizeSource::Viewport)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_fire_settles_once_after_delay() {
        let coordinator = ResizeCoordinator::default();
        coordinator.set_viewport(HeadlessRegion::new(800.0, 600.0).shared());

        let resizes = Rc::new(RefCell::new(Vec::new()));
        let settles = Rc::new(RefCell::new(Vec::new()));
        let (r, s) = (resizes.clone(), settles.clone());
        let zoom = coordinator
            .create_zoom(
                vec![HeadlessRegion::new(400.0, 300.0).shared() as RegionRef],
                ZoomOptions::new()
                    .on_resize(move |_| r.borrow_mut().push(Instant::now()))
                    .on_resize_finish(move |zoom| {
                        s.borrow_mut().push((Instant::now(), zoom.zoomfactor()))
                    }),
            )
            .unwrap();

        let (events, driver) = channel(coordinator.clone());
        let feeder = async move {
            for _ in 0..20 {
                events.send(resize()).unwrap();
                sleep(Duration::from_millis(10)).await;
            }
            sleep(Duration::from_millis(500)).await;
        };

        let (stats, ()) = tokio::join!(driver.run(), feeder);

        assert_eq!(stats.events, 20);
        assert_eq!(stats.settles, 1);
        assert_eq!(resizes.borrow().len(), 20);

        let settles = settles.borrow();
        assert_eq!(settles.len(), 1);
        let last_resize = *resizes.borrow().last().unwrap();
        let (settled_at, factor) = settles[0];
        assert!(settled_at >= last_resize + Duration::from_millis(100));
        assert!(settled_at <= last_resize + Duration::from_millis(110));
        assert_eq!(factor, 2.0);
        assert_eq!(zoom.zoomfactor(), 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_settle_separately() {
        let coordinator = ResizeCoordinator::default();
        let (events, driver) = channel(coordinator.clone());

        let feeder = async move {
            events.send(resize()).unwrap();
            events.send(resize()).unwrap();
            sleep(Duration::from_millis(300)).await;
            events.send(resize()).unwrap();
            sleep(Duration::from_millis(300)).await;
        };

        let (stats, ()) = tokio::join!(driver.run(), feeder);
        assert_eq!(stats.events, 3);
        assert_eq!(stats.settles, 2);
        assert_eq!(coordinator.stats().settles, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_settle_flushed_on_close() {
        let coordinator = ResizeCoordinator::default();
        let (events, driver) = channel(coordinator.clone());

        events.send(resize()).unwrap();
        drop(events);

        let started = Instant::now();
        let stats = driver.run().await;
        assert_eq!(stats.settles, 1);
        assert!(Instant::now() >= started + Duration::from_millis(100));
        assert!(coordinator.next_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disposed_coordinator_stops_quietly() {
        let coordinator = ResizeCoordinator::default();
        let (events, driver) = channel(coordinator.clone());

        events.send(resize()).unwrap();
        coordinator.dispose();
        drop(events);

        let stats = driver.run().await;
        assert_eq!(stats.events, 1);
        assert_eq!(stats.settles, 0);
    }
}
