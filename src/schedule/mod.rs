//! Weekly schedules and the free-time computation shared by the routines API.
//!
//! Routine bookings are half-open hour ranges `[start_hour, end_hour)` on one
//! weekday. [`OccupancyGrid`] ORs bookings of any number of users into a fixed
//! 7×24 table and [`OccupancyGrid::free_intervals`] compresses it back into
//! maximal free blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown weekday: {0}")]
pub struct UnknownWeekday(pub String);

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

// Rows store the day as text; sqlx decodes through this.
impl TryFrom<String> for Weekday {
    type Error = UnknownWeekday;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A time block on one weekday, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    pub day: Weekday,
    pub start_hour: i32,
    pub end_hour: i32,
}

impl Schedule {
    pub fn new(day: Weekday, start_hour: i32, end_hour: i32) -> Self {
        Self {
            day,
            start_hour,
            end_hour,
        }
    }

    /// True when `0 <= start_hour < end_hour <= 24`.
    pub fn is_valid(&self) -> bool {
        0 <= self.start_hour && self.start_hour < self.end_hour && self.end_hour <= HOURS_PER_DAY as i32
    }

    /// Half-open overlap on the same day. Touching blocks do not overlap.
    pub fn overlaps(&self, other: &Schedule) -> bool {
        self.day == other.day && self.start_hour < other.end_hour && other.start_hour < self.end_hour
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSchedule {
    pub schedules: Vec<Schedule>,
}

impl FreeSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Per-day, per-hour free flags. `true` means free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    slots: [[bool; HOURS_PER_DAY]; 7],
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl OccupancyGrid {
    /// A grid with every hour of every day free.
    pub fn new() -> Self {
        Self {
            slots: [[true; HOURS_PER_DAY]; 7],
        }
    }

    /// Marks every hour of `booking` as occupied. Hours outside the day are ignored.
    pub fn book(&mut self, booking: &Schedule) {
        let row = &mut self.slots[booking.day.index()];
        let start = booking.start_hour.max(0);
        let end = booking.end_hour.min(HOURS_PER_DAY as i32);
        for hour in start..end {
            row[hour as usize] = false;
        }
    }

    pub fn book_all<'a>(&mut self, bookings: impl IntoIterator<Item = &'a Schedule>) {
        for booking in bookings {
            self.book(booking);
        }
    }

    /// ORs the occupied hours of `other` into this grid.
    pub fn merge(&mut self, other: &OccupancyGrid) {
        for (row, other_row) in self.slots.iter_mut().zip(other.slots.iter()) {
            for (slot, other_slot) in row.iter_mut().zip(other_row.iter()) {
                *slot &= *other_slot;
            }
        }
    }

    pub fn is_free(&self, day: Weekday, hour: usize) -> bool {
        self.slots[day.index()][hour]
    }

    pub fn day(&self, day: Weekday) -> &[bool; HOURS_PER_DAY] {
        &self.slots[day.index()]
    }

    /// Maximal runs of free hours, one entry per run, days in week order and
    /// runs in increasing start hour within a day.
    pub fn free_intervals(&self) -> Vec<Schedule> {
        let mut schedules = Vec::new();

        for day in Weekday::ALL {
            let mut run_start: Option<usize> = None;

            for (hour, &free) in self.day(day).iter().enumerate() {
                match (free, run_start) {
                    (true, None) => run_start = Some(hour),
                    (false, Some(start)) => {
                        schedules.push(Schedule::new(day, start as i32, hour as i32));
                        run_start = None;
                    }
                    _ => {}
                }
            }

            if let Some(start) = run_start {
                schedules.push(Schedule::new(day, start as i32, HOURS_PER_DAY as i32));
            }
        }

        schedules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn as_set(schedules: &[Schedule]) -> HashSet<(Weekday, i32, i32)> {
        schedules
            .iter()
            .map(|s| (s.day, s.start_hour, s.end_hour))
            .collect()
    }

    #[test]
    fn empty_grid_is_one_block_per_day() {
        let intervals = OccupancyGrid::new().free_intervals();
        assert_eq!(intervals.len(), 7);
        for s in &intervals {
            assert_eq!((s.start_hour, s.end_hour), (0, 24));
        }
    }

    #[test]
    fn monday_morning_booking_splits_monday() {
        let mut grid = OccupancyGrid::new();
        grid.book(&Schedule::new(Weekday::Monday, 8, 10));

        let got = as_set(&grid.free_intervals());
        assert!(got.contains(&(Weekday::Monday, 0, 8)));
        assert!(got.contains(&(Weekday::Monday, 10, 24)));
        for day in &Weekday::ALL[1..] {
            assert!(got.contains(&(*day, 0, 24)));
        }
        assert_eq!(got.len(), 8);
    }

    #[test]
    fn overlapping_bookings_merge() {
        let mut a = OccupancyGrid::new();
        a.book(&Schedule::new(Weekday::Monday, 8, 10));
        let mut b = OccupancyGrid::new();
        b.book(&Schedule::new(Weekday::Monday, 9, 11));
        a.merge(&b);

        let monday: Vec<_> = a
            .free_intervals()
            .into_iter()
            .filter(|s| s.day == Weekday::Monday)
            .collect();
        assert_eq!(
            monday,
            vec![
                Schedule::new(Weekday::Monday, 0, 8),
                Schedule::new(Weekday::Monday, 11, 24)
            ]
        );
    }

    #[test]
    fn fully_booked_day_yields_nothing() {
        let mut grid = OccupancyGrid::new();
        grid.book(&Schedule::new(Weekday::Sunday, 0, 24));
        assert!(grid
            .free_intervals()
            .iter()
            .all(|s| s.day != Weekday::Sunday));
    }

    #[test]
    fn fully_booked_week_yields_nothing() {
        let mut grid = OccupancyGrid::new();
        let week: Vec<_> = Weekday::ALL
            .into_iter()
            .map(|day| Schedule::new(day, 0, 24))
            .collect();
        grid.book_all(&week);
        assert!(grid.free_intervals().is_empty());
    }

    #[test]
    fn single_free_hours() {
        let mut grid = OccupancyGrid::new();
        grid.book(&Schedule::new(Weekday::Friday, 0, 5));
        grid.book(&Schedule::new(Weekday::Friday, 6, 23));

        let friday: Vec<_> = grid
            .free_intervals()
            .into_iter()
            .filter(|s| s.day == Weekday::Friday)
            .collect();
        assert_eq!(
            friday,
            vec![
                Schedule::new(Weekday::Friday, 5, 6),
                Schedule::new(Weekday::Friday, 23, 24)
            ]
        );
    }

    #[test]
    fn out_of_range_hours_are_ignored() {
        let mut grid = OccupancyGrid::new();
        grid.book(&Schedule::new(Weekday::Tuesday, -3, 2));
        grid.book(&Schedule::new(Weekday::Tuesday, 22, 30));
        assert!(!grid.is_free(Weekday::Tuesday, 0));
        assert!(grid.is_free(Weekday::Tuesday, 2));
        assert!(!grid.is_free(Weekday::Tuesday, 23));
    }

    #[test]
    fn intervals_cover_exactly_the_free_hours() {
        let bookings = [
            Schedule::new(Weekday::Monday, 1, 3),
            Schedule::new(Weekday::Monday, 2, 7),
            Schedule::new(Weekday::Wednesday, 12, 13),
            Schedule::new(Weekday::Wednesday, 14, 15),
            Schedule::new(Weekday::Saturday, 0, 24),
            Schedule::new(Weekday::Sunday, 23, 24),
        ];
        let mut grid = OccupancyGrid::new();
        grid.book_all(&bookings);

        for day in Weekday::ALL {
            for hour in 0..HOURS_PER_DAY {
                let booked = bookings
                    .iter()
                    .any(|b| b.day == day && (b.start_hour as usize) <= hour && hour < b.end_hour as usize);
                assert_eq!(grid.is_free(day, hour), !booked, "{} {}", day, hour);
            }
        }

        let intervals = grid.free_intervals();
        for day in Weekday::ALL {
            let runs: Vec<_> = intervals.iter().filter(|s| s.day == day).collect();
            let mut covered = [false; HOURS_PER_DAY];
            for run in &runs {
                assert!(run.start_hour < run.end_hour);
                for hour in run.start_hour..run.end_hour {
                    covered[hour as usize] = true;
                }
            }
            assert_eq!(&covered, grid.day(day));
            for pair in runs.windows(2) {
                assert!(pair[0].end_hour < pair[1].start_hour, "runs must not touch");
            }
        }
    }

    #[test]
    fn booking_order_does_not_matter() {
        let bookings = [
            Schedule::new(Weekday::Thursday, 4, 9),
            Schedule::new(Weekday::Thursday, 8, 12),
            Schedule::new(Weekday::Monday, 20, 24),
        ];
        let mut forward = OccupancyGrid::new();
        forward.book_all(bookings.iter());
        let mut backward = OccupancyGrid::new();
        backward.book_all(bookings.iter().rev());
        assert_eq!(forward, backward);

        let mut twice = forward.clone();
        twice.book_all(bookings.iter());
        assert_eq!(twice.free_intervals(), forward.free_intervals());
    }

    #[test]
    fn weekday_parses_and_rejects() {
        assert_eq!("Wednesday".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert!("wednesday".parse::<Weekday>().is_err());
        assert!(Weekday::try_from("Funday".to_string()).is_err());
    }

    #[test]
    fn schedule_validity_and_overlap() {
        assert!(Schedule::new(Weekday::Monday, 0, 24).is_valid());
        assert!(!Schedule::new(Weekday::Monday, 10, 10).is_valid());
        assert!(!Schedule::new(Weekday::Monday, -1, 3).is_valid());
        assert!(!Schedule::new(Weekday::Monday, 20, 25).is_valid());

        let a = Schedule::new(Weekday::Monday, 8, 10);
        assert!(a.overlaps(&Schedule::new(Weekday::Monday, 9, 11)));
        assert!(!a.overlaps(&Schedule::new(Weekday::Monday, 10, 12)));
        assert!(!a.overlaps(&Schedule::new(Weekday::Tuesday, 8, 10)));
    }
}
