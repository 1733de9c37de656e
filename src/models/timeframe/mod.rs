// Timeframe module
// Concrete reserved interval used for conflict and availability checks

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// A concrete, already-materialized busy interval. An absent end means the
/// interval is open-ended and blocks indefinitely from its start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeframe {
    pub id: Option<i64>,
    pub label: Option<String>,
    pub start: DateTime<Local>,
    pub end: Option<DateTime<Local>>,
    pub active: bool,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Timeframe {
    /// Create a new closed timeframe with required fields
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, String> {
        let frame = Self {
            id: None,
            label: None,
            start,
            end: Some(end),
            active: true,
            created_at: None,
            updated_at: None,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Create a new open-ended timeframe starting at `start`.
    pub fn open_ended(start: DateTime<Local>) -> Self {
        Self {
            id: None,
            label: None,
            start,
            end: None,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate the timeframe invariants.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(end) = self.end {
            if end <= self.start {
                return Err("Timeframe end must be strictly after start".to_string());
            }
        }
        Ok(())
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Duration of the interval; `None` for an open-ended frame.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    /// Whether this frame overlaps the candidate range. An absent candidate
    /// end means "unbounded above"; an open-ended frame overlaps everything
    /// at or after its own start.
    pub fn overlaps(&self, start: DateTime<Local>, end: Option<DateTime<Local>>) -> bool {
        let starts_before_candidate_end = match end {
            Some(end) => self.start <= end,
            None => true,
        };
        let ends_after_candidate_start = match self.end {
            Some(own_end) => own_end > start,
            None => true,
        };
        starts_before_candidate_end && ends_after_candidate_start
    }
}

/// Merge overlapping or adjacent timeframes into their union, sorted by
/// start. An open-ended member absorbs everything at or after its start, so
/// it is always the last element of the result.
///
/// The availability walk requires its busy input to be disjoint; feeding it
/// raw storage rows without this step can move its cursor backwards.
pub fn coalesce(mut frames: Vec<Timeframe>) -> Vec<Timeframe> {
    if frames.is_empty() {
        return frames;
    }

    frames.sort_by(|a, b| a.start.cmp(&b.start));

    let mut merged: Vec<Timeframe> = Vec::with_capacity(frames.len());
    for frame in frames {
        match merged.last_mut() {
            Some(last) => {
                let last_end = match last.end {
                    Some(end) => end,
                    // Open-ended: everything later is already covered.
                    None => break,
                };
                if frame.start <= last_end {
                    last.end = match frame.end {
                        Some(end) => Some(end.max(last_end)),
                        None => None,
                    };
                } else {
                    merged.push(frame);
                }
            }
            None => merged.push(frame),
        }
    }

    merged
}

/// A free interval reported by the availability finder. Always closed; the
/// walk never emits a slot without a concrete end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl FreeSlot {
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()
    }

    fn closed(start_hour: u32, end_hour: u32) -> Timeframe {
        Timeframe::new(at(start_hour), at(end_hour)).unwrap()
    }

    #[test]
    fn test_validate_rejects_end_at_start() {
        let mut frame = closed(9, 10);
        frame.end = Some(frame.start);
        assert!(frame.validate().is_err());
    }

    #[test]
    fn test_duration_of_open_ended_is_none() {
        let frame = Timeframe::open_ended(at(9));
        assert!(frame.is_open_ended());
        assert_eq!(frame.duration(), None);
    }

    #[test]
    fn test_overlaps_closed_ranges() {
        let frame = closed(9, 11);
        assert!(frame.overlaps(at(10), Some(at(12))));
        assert!(frame.overlaps(at(8), Some(at(9))));
        assert!(!frame.overlaps(at(11), Some(at(12))));
    }

    #[test]
    fn test_open_ended_frame_blocks_everything_after_start() {
        let frame = Timeframe::open_ended(at(10));
        assert!(frame.overlaps(at(12), Some(at(13))));
        assert!(frame.overlaps(at(9), None));
        assert!(!frame.overlaps(at(8), Some(at(9))));
    }

    #[test]
    fn test_json_round_trip_keeps_open_end() {
        let frame = Timeframe::open_ended(at(9));
        let json = serde_json::to_string(&frame).unwrap();
        let back: Timeframe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
        assert!(back.is_open_ended());
    }

    #[test]
    fn test_coalesce_merges_overlapping() {
        let merged = coalesce(vec![closed(9, 11), closed(10, 12), closed(13, 14)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start, at(9));
        assert_eq!(merged[0].end, Some(at(12)));
        assert_eq!(merged[1].start, at(13));
    }

    #[test]
    fn test_coalesce_merges_adjacent() {
        let merged = coalesce(vec![closed(9, 10), closed(10, 11)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].end, Some(at(11)));
    }

    #[test]
    fn test_coalesce_is_sorted_even_when_input_is_not() {
        let merged = coalesce(vec![closed(13, 14), closed(9, 10)]);
        assert_eq!(merged[0].start, at(9));
        assert_eq!(merged[1].start, at(13));
    }

    #[test]
    fn test_coalesce_open_ended_absorbs_tail() {
        let merged = coalesce(vec![closed(9, 10), Timeframe::open_ended(at(9)), closed(12, 13)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, at(9));
        assert_eq!(merged[0].end, None);
    }
}
