//=========================================================================
// Anxiety Meter
//=========================================================================
//
// The bounded tension counter shared by every scene.
//
// Architecture:
//   increase()/decrease() → clamp to [0, 10] → AnxietyChange
//                                                   ↓
//                          AnxietyCue::for_change() (pulse/shake/sound)
//
// The meter never assigns its level directly from outside; every change
// goes through `increase`/`decrease`, which clamp. Reaching the maximum
// is reported in the returned `AnxietyChange`, but the forced GameOver
// transition belongs to the scene machine.
//
//=========================================================================

//=== Constants ===========================================================

/// Upper bound of the meter. Reaching it ends the game.
pub const MAX_ANXIETY: u8 = 10;

/// Lower edge of the "high anxiety" warning band `[8, 10)`.
pub const WARNING_THRESHOLD: u8 = 8;

const PULSE_BASE_MS: u64 = 500;
const PULSE_STEP_MS: u64 = 200;
const SHAKE_MIN_MAGNITUDE: u8 = 2;
const SHAKE_BASE_MS: u64 = 300;
const SHAKE_STEP_MS: u64 = 100;
const WARNING_MS: u64 = 2000;
const WARNING_PULSE_MS: u64 = 500;

//=== Direction ===========================================================

/// Which way a change moved the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Easing,
}

//=== AnxietyChange =======================================================

/// Outcome of a single meter mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnxietyChange {
    pub previous: u8,
    pub level: u8,
}

impl AnxietyChange {
    /// Absolute size of the applied change (after clamping).
    pub fn magnitude(&self) -> u8 {
        self.previous.abs_diff(self.level)
    }

    /// `None` when clamping swallowed the whole request.
    pub fn direction(&self) -> Option<Direction> {
        match self.level.cmp(&self.previous) {
            std::cmp::Ordering::Greater => Some(Direction::Rising),
            std::cmp::Ordering::Less => Some(Direction::Easing),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True when this change moved the meter onto its maximum.
    pub fn reached_max(&self) -> bool {
        self.level == MAX_ANXIETY && self.previous < MAX_ANXIETY
    }

    /// True once per crossing into the warning band.
    pub fn entered_warning(&self) -> bool {
        in_warning_band(self.level) && !in_warning_band(self.previous)
    }
}

fn in_warning_band(level: u8) -> bool {
    (WARNING_THRESHOLD..MAX_ANXIETY).contains(&level)
}

//=== AnxietyMeter ========================================================

/// Clamped `[0, 10]` counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnxietyMeter {
    level: u8,
}

impl AnxietyMeter {
    pub fn new() -> Self {
        Self { level: 0 }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// The game-over predicate.
    pub fn is_maxed(&self) -> bool {
        self.level >= MAX_ANXIETY
    }

    pub fn increase(&mut self, amount: u32) -> AnxietyChange {
        let target = (self.level as u32).saturating_add(amount).min(MAX_ANXIETY as u32);
        self.set(target as u8)
    }

    pub fn decrease(&mut self, amount: u32) -> AnxietyChange {
        let target = (self.level as u32).saturating_sub(amount);
        self.set(target as u8)
    }

    /// Signed convenience used by dialog options: positive raises, negative eases.
    pub fn adjust(&mut self, delta: i32) -> AnxietyChange {
        if delta >= 0 {
            self.increase(delta.unsigned_abs())
        } else {
            self.decrease(delta.unsigned_abs())
        }
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }

    fn set(&mut self, level: u8) -> AnxietyChange {
        let previous = self.level;
        self.level = level;
        AnxietyChange { previous, level }
    }
}

//=== AnxietyCue ==========================================================

/// Screen shake parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shake {
    pub duration_ms: u64,
    pub intensity: f32,
}

/// Standing warning shown when the meter enters the high band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub duration_ms: u64,
    pub pulse_interval_ms: u64,
}

/// Presentation hint published on the message bus after each change.
///
/// Intensity and duration grow with the magnitude of the change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnxietyCue {
    pub direction: Direction,
    pub magnitude: u8,
    pub pulse_ms: u64,
    pub shake: Option<Shake>,
    /// Volume of the rising/easing sound, if one should play.
    pub sound_volume: Option<f32>,
    pub warning: Option<Warning>,
}

impl AnxietyCue {
    /// Builds the cue for a change; `None` when nothing moved.
    pub fn for_change(change: &AnxietyChange) -> Option<Self> {
        let direction = change.direction()?;
        let magnitude = change.magnitude();
        let steps = (magnitude - 1) as f32;

        let (shake, sound_volume) = match direction {
            Direction::Rising if magnitude >= SHAKE_MIN_MAGNITUDE => (
                Some(Shake {
                    duration_ms: SHAKE_BASE_MS + SHAKE_STEP_MS * magnitude as u64,
                    intensity: magnitude as f32 * 2.0,
                }),
                Some((0.2 + 0.125 * steps).clamp(0.0, 1.0)),
            ),
            Direction::Rising => (None, None),
            Direction::Easing => (None, Some((0.2 + 0.075 * steps).clamp(0.0, 1.0))),
        };

        let warning = change.entered_warning().then_some(Warning {
            duration_ms: WARNING_MS,
            pulse_interval_ms: WARNING_PULSE_MS,
        });

        Some(Self {
            direction,
            magnitude,
            pulse_ms: PULSE_BASE_MS + PULSE_STEP_MS * magnitude as u64,
            shake,
            sound_volume,
            warning,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Clamping ---------------------------------------------------------

    #[test]
    fn level_tracks_clamped_running_sum() {
        let mut meter = AnxietyMeter::new();
        let script: [i32; 10] = [3, 4, -2, 9, -20, 1, 1, -1, 12, -3];
        let mut expected: i32 = 0;

        for delta in script {
            meter.adjust(delta);
            expected = (expected + delta).clamp(0, MAX_ANXIETY as i32);
            assert_eq!(meter.level() as i32, expected, "after applying {}", delta);
            assert!(meter.level() <= MAX_ANXIETY);
        }
    }

    #[test]
    fn increase_saturates_at_max() {
        let mut meter = AnxietyMeter::new();
        meter.increase(8);
        let change = meter.increase(3);

        assert_eq!(change.level, 10);
        assert!(change.reached_max());
        assert!(meter.is_maxed());

        let again = meter.increase(u32::MAX);
        assert_eq!(again.level, 10);
        assert!(!again.reached_max(), "Already at max, no new crossing");
        assert_eq!(again.direction(), None);
    }

    #[test]
    fn decrease_floors_at_zero() {
        let mut meter = AnxietyMeter::new();
        meter.increase(2);
        let change = meter.decrease(5);

        assert_eq!(change.level, 0);
        assert_eq!(change.magnitude(), 2, "Magnitude is measured after clamping");
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut meter = AnxietyMeter::new();
        meter.increase(7);
        meter.reset();
        assert_eq!(meter.level(), 0);
    }

    //--- Warning Band -----------------------------------------------------

    #[test]
    fn warning_raised_once_per_crossing() {
        let mut meter = AnxietyMeter::new();
        meter.increase(7);

        assert!(meter.increase(1).entered_warning(), "7 → 8 enters the band");
        assert!(!meter.increase(1).entered_warning(), "8 → 9 stays inside");
        assert!(!meter.decrease(3).entered_warning(), "Leaving the band");
        assert!(meter.increase(2).entered_warning(), "Re-entering warns again");
    }

    #[test]
    fn reaching_max_is_not_a_warning() {
        let mut meter = AnxietyMeter::new();
        meter.increase(5);
        let change = meter.increase(5);
        assert!(!change.entered_warning());
        assert!(change.reached_max());
    }

    //--- Cues -------------------------------------------------------------

    #[test]
    fn noop_change_has_no_cue() {
        let mut meter = AnxietyMeter::new();
        assert!(AnxietyCue::for_change(&meter.decrease(1)).is_none());
    }

    #[test]
    fn small_rise_pulses_without_shake() {
        let mut meter = AnxietyMeter::new();
        let cue = AnxietyCue::for_change(&meter.increase(1)).expect("cue");

        assert_eq!(cue.direction, Direction::Rising);
        assert_eq!(cue.pulse_ms, 700);
        assert!(cue.shake.is_none());
        assert!(cue.sound_volume.is_none());
    }

    #[test]
    fn cue_intensity_grows_with_magnitude() {
        let mut previous: Option<AnxietyCue> = None;
        for amount in 2..=5 {
            let mut meter = AnxietyMeter::new();
            let cue = AnxietyCue::for_change(&meter.increase(amount)).expect("cue");
            let shake = cue.shake.expect("rises of 2+ shake");

            if let Some(prev) = previous {
                let prev_shake = prev.shake.expect("shake");
                assert!(cue.pulse_ms > prev.pulse_ms);
                assert!(shake.duration_ms > prev_shake.duration_ms);
                assert!(shake.intensity > prev_shake.intensity);
                assert!(cue.sound_volume > prev.sound_volume);
            }
            previous = Some(cue);
        }
    }

    #[test]
    fn easing_cue_plays_soft_sound() {
        let mut meter = AnxietyMeter::new();
        meter.increase(5);
        let cue = AnxietyCue::for_change(&meter.decrease(1)).expect("cue");

        assert_eq!(cue.direction, Direction::Easing);
        assert!(cue.shake.is_none());
        assert_eq!(cue.sound_volume, Some(0.2));
    }

    #[test]
    fn crossing_into_band_attaches_warning() {
        let mut meter = AnxietyMeter::new();
        meter.increase(6);
        let cue = AnxietyCue::for_change(&meter.increase(2)).expect("cue");
        assert_eq!(
            cue.warning,
            Some(Warning { duration_ms: 2000, pulse_interval_ms: 500 })
        );
    }
}
