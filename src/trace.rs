//! Diagnostic tracing for the compile and match phases.
//!
//! Controlled by the `ONIGIRI_TRACE` environment variable, read once per
//! process: `1` enables every phase, otherwise a comma-separated list of
//! phase names (`parse`, `exec`).

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Parse,
    Exec,
}

impl Phase {
    const ALL: [Phase; 2] = [Phase::Parse, Phase::Exec];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Phase::Parse => "parse",
            Phase::Exec => "exec",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

fn enabled_mask() -> u8 {
    static MASK: OnceLock<u8> = OnceLock::new();
    *MASK.get_or_init(|| {
        let setting = match std::env::var("ONIGIRI_TRACE") {
            Ok(value) => value,
            Err(_) => return 0,
        };
        match setting.as_str() {
            "" | "0" => 0,
            "1" => u8::MAX,
            list => list
                .split(',')
                .filter_map(|name| {
                    Phase::ALL.iter().find(|phase| phase.name() == name.trim())
                })
                .fold(0, |mask, phase| mask | phase.bit()),
        }
    })
}

pub(crate) fn is_enabled(phase: Phase) -> bool {
    enabled_mask() & phase.bit() != 0
}

macro_rules! trace_log {
    ($phase:ident, $($arg:tt)*) => {
        if $crate::trace::is_enabled($crate::trace::Phase::$phase) {
            eprintln!(
                "[{}] {}",
                $crate::trace::Phase::$phase.name(),
                format!($($arg)*)
            );
        }
    };
}
pub(crate) use trace_log;
