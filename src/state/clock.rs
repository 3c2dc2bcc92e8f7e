//! Clock - Current time shown in the nav bar
//!
//! Rendered as `HH:MM <label>` immediately at mount and then on every
//! refresh tick. Where the time comes from is pluggable so tests can pin it.

use chrono::{Local, NaiveTime, Timelike};
use spark_signals::{signal, Signal};

use crate::pipeline::timers::{TimerQueue, TimerTask};
use crate::types::ElementId;

/// Source of the wall-clock time of day.
pub trait TimeSource {
    fn now(&self) -> NaiveTime;
}

/// Host local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Time source pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub NaiveTime);

impl TimeSource for FixedTime {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// `HH:MM label`, zero padded.
pub fn format_clock(time: NaiveTime, label: &str) -> String {
    format!("{:02}:{:02} {}", time.hour(), time.minute(), label)
}

/// Clock text for the designated element.
pub struct Clock {
    element: ElementId,
    label: String,
    source: Box<dyn TimeSource>,
    text: Signal<String>,
}

impl Clock {
    pub fn new(element: ElementId, label: impl Into<String>, source: Box<dyn TimeSource>) -> Self {
        Self {
            element,
            label: label.into(),
            source,
            text: signal(String::new()),
        }
    }

    /// Render now and refresh every `period`.
    pub fn start(&mut self, timers: &mut TimerQueue, period: std::time::Duration) {
        self.refresh();
        timers.set_interval(period, TimerTask::RefreshClock);
    }

    pub fn refresh(&mut self) {
        let next = format_clock(self.source.now(), &self.label);
        if self.text.get() != next {
            self.text.set(next);
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn text_signal(&self) -> Signal<String> {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 42).unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(format_clock(at(9, 5), "IST"), "09:05 IST");
        assert_eq!(format_clock(at(23, 59), "UTC"), "23:59 UTC");
    }

    #[test]
    fn test_start_renders_immediately_and_schedules() {
        let mut clock = Clock::new(ElementId(0), "IST", Box::new(FixedTime(at(7, 30))));
        let mut timers = TimerQueue::new();
        assert_eq!(clock.text(), "");

        clock.start(&mut timers, Duration::from_secs(1));
        assert_eq!(clock.text(), "07:30 IST");
        assert_eq!(timers.next_due(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_local_time_formats() {
        let text = format_clock(LocalTime.now(), "IST");
        assert_eq!(text.len(), "00:00 IST".len());
        assert!(text.ends_with(" IST"));
    }
}
