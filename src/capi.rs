use std::{
    ffi::CStr,
    os::raw::c_char,
    panic::{catch_unwind, AssertUnwindSafe},
};

use crate::{
    engine::rosu::RosuEngine,
    model::{
        judgment::{Judgment, JudgmentCounts},
        mode::GameModeExt,
        statistics::HitResultSource,
    },
    CalculateError, Calculator, ChartSource, ErrorKind, PartialStatistics, RawMod, ScoreRequest,
};

/// Error codes returned by the C API.
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HitstatsError {
    Ok = 0,
    NullPointer = 1,
    InvalidUtf8 = 2,
    InvalidMode = 3,
    ChartNotFound = 4,
    DecodeFailure = 5,
    EngineFailure = 6,
    Panic = 7,
}

impl From<&CalculateError> for HitstatsError {
    fn from(err: &CalculateError) -> Self {
        match err.kind() {
            ErrorKind::InvalidMode => Self::InvalidMode,
            ErrorKind::ChartNotFound => Self::ChartNotFound,
            ErrorKind::DecodeFailure => Self::DecodeFailure,
            ErrorKind::EngineFailure => Self::EngineFailure,
        }
    }
}

/// Where the judgments of a [`HitstatsResult`] come from.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HitstatsSource {
    #[default]
    Simulated = 0,
    Explicit = 1,
}

impl From<HitResultSource> for HitstatsSource {
    fn from(source: HitResultSource) -> Self {
        match source {
            HitResultSource::Simulated => Self::Simulated,
            HitResultSource::Explicit => Self::Explicit,
        }
    }
}

/// C representation of judgment counts.
///
/// When passed as input, zero fields count as absent.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HitstatsStatistics {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub ok: u32,
    pub meh: u32,
    pub miss: u32,
    pub large_tick_hit: u32,
    pub small_tick_hit: u32,
    pub small_tick_miss: u32,
}

impl From<HitstatsStatistics> for PartialStatistics {
    fn from(statistics: HitstatsStatistics) -> Self {
        [
            (Judgment::Perfect, statistics.perfect),
            (Judgment::Great, statistics.great),
            (Judgment::Good, statistics.good),
            (Judgment::Ok, statistics.ok),
            (Judgment::Meh, statistics.meh),
            (Judgment::Miss, statistics.miss),
            (Judgment::LargeTickHit, statistics.large_tick_hit),
            (Judgment::SmallTickHit, statistics.small_tick_hit),
            (Judgment::SmallTickMiss, statistics.small_tick_miss),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

impl From<&JudgmentCounts> for HitstatsStatistics {
    fn from(judgments: &JudgmentCounts) -> Self {
        Self {
            perfect: judgments.get(Judgment::Perfect),
            great: judgments.get(Judgment::Great),
            good: judgments.get(Judgment::Good),
            ok: judgments.get(Judgment::Ok),
            meh: judgments.get(Judgment::Meh),
            miss: judgments.get(Judgment::Miss),
            large_tick_hit: judgments.get(Judgment::LargeTickHit),
            small_tick_hit: judgments.get(Judgment::SmallTickHit),
            small_tick_miss: judgments.get(Judgment::SmallTickMiss),
        }
    }
}

/// Result of a calculation.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct HitstatsResult {
    pub mode: u8,
    pub stars: f64,
    pub pp: f64,
    pub max_combo: u32,
    pub combo: u32,
    pub statistics: HitstatsStatistics,
    pub source: HitstatsSource,
    /// Amount of mods and other warnings that were ignored.
    pub warnings: u32,
}

/// Score parameters shared by all entry points.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HitstatsScore {
    pub mode: u8,
    /// NUL-terminated acronyms separated by commas or whitespace, e.g.
    /// `"HD,DT"`. May be `NULL`.
    pub mods: *const c_char,
    /// Accuracy in percent.
    pub accuracy: f64,
    /// Negative if the chart's max combo should be used.
    pub combo: i64,
    pub misses: u32,
    /// `0` if the score was not set on stable.
    pub legacy_total_score: u32,
    /// Explicit judgments. May be `NULL`.
    pub statistics: *const HitstatsStatistics,
}

/// Convert an error code into a static, NUL-terminated string.
#[no_mangle]
pub extern "C" fn hitstats_error_str(err: i32) -> *const c_char {
    match err {
        x if x == HitstatsError::Ok as i32 => b"Ok\0".as_ptr(),
        x if x == HitstatsError::NullPointer as i32 => b"NullPointer\0".as_ptr(),
        x if x == HitstatsError::InvalidUtf8 as i32 => b"InvalidUtf8\0".as_ptr(),
        x if x == HitstatsError::InvalidMode as i32 => b"InvalidMode\0".as_ptr(),
        x if x == HitstatsError::ChartNotFound as i32 => b"ChartNotFound\0".as_ptr(),
        x if x == HitstatsError::DecodeFailure as i32 => b"DecodeFailure\0".as_ptr(),
        x if x == HitstatsError::EngineFailure as i32 => b"EngineFailure\0".as_ptr(),
        x if x == HitstatsError::Panic as i32 => b"Panic\0".as_ptr(),
        _ => b"Unknown\0".as_ptr(),
    }
    .cast::<c_char>()
}

/// Calculate a score on a `.osu` file.
///
/// # Safety
/// - `path` must be a valid, NUL-terminated UTF-8 string.
/// - `score.mods` must be `NULL` or a valid, NUL-terminated UTF-8 string.
/// - `score.statistics` must be `NULL` or a valid pointer.
/// - `out` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn hitstats_calculate_from_path(
    path: *const c_char,
    score: HitstatsScore,
    out: *mut HitstatsResult,
) -> HitstatsError {
    if path.is_null() || out.is_null() {
        return HitstatsError::NullPointer;
    }

    match catch_unwind(AssertUnwindSafe(|| {
        let path = CStr::from_ptr(path)
            .to_str()
            .map_err(|_| HitstatsError::InvalidUtf8)?;

        let res = calculate(ChartSource::path(path), &score)?;
        out.write(res);

        Ok(())
    })) {
        Ok(Ok(())) => HitstatsError::Ok,
        Ok(Err(err)) => err,
        Err(_) => HitstatsError::Panic,
    }
}

/// Calculate a score on an in-memory `.osu` file.
///
/// # Safety
/// - If `len != 0`, `bytes` must be valid for reads of `len` bytes.
/// - `score.mods` must be `NULL` or a valid, NUL-terminated UTF-8 string.
/// - `score.statistics` must be `NULL` or a valid pointer.
/// - `out` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn hitstats_calculate_from_bytes(
    bytes: *const u8,
    len: usize,
    score: HitstatsScore,
    out: *mut HitstatsResult,
) -> HitstatsError {
    if out.is_null() || (bytes.is_null() && len != 0) {
        return HitstatsError::NullPointer;
    }

    match catch_unwind(AssertUnwindSafe(|| {
        let bytes = if len == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(bytes, len)
        };

        let res = calculate(ChartSource::bytes(bytes), &score)?;
        out.write(res);

        Ok(())
    })) {
        Ok(Ok(())) => HitstatsError::Ok,
        Ok(Err(err)) => err,
        Err(_) => HitstatsError::Panic,
    }
}

unsafe fn calculate(chart: ChartSource, score: &HitstatsScore) -> Result<HitstatsResult, HitstatsError> {
    let mods = if score.mods.is_null() {
        Vec::new()
    } else {
        let mods = CStr::from_ptr(score.mods)
            .to_str()
            .map_err(|_| HitstatsError::InvalidUtf8)?;

        split_mods(mods)
    };

    let mut request = ScoreRequest::new(chart, score.mode)
        .mods(mods)
        .accuracy(score.accuracy)
        .misses(score.misses);

    if let Ok(combo) = u32::try_from(score.combo) {
        request = request.combo(combo);
    }

    if score.legacy_total_score > 0 {
        request = request.legacy_total_score(score.legacy_total_score);
    }

    if let Some(statistics) = score.statistics.as_ref() {
        request = request.statistics(*statistics);
    }

    let attrs = Calculator::new(RosuEngine::new())
        .calculate(&request)
        .map_err(|err| HitstatsError::from(&err))?;

    Ok(HitstatsResult {
        mode: attrs.mode.id(),
        stars: attrs.stars,
        pp: attrs.pp,
        max_combo: attrs.max_combo,
        combo: attrs.combo,
        statistics: HitstatsStatistics::from(&attrs.judgments),
        source: attrs.source.into(),
        warnings: u32::try_from(attrs.warnings.len()).unwrap_or(u32::MAX),
    })
}

fn split_mods(mods: &str) -> Vec<RawMod> {
    mods.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|acronym| !acronym.is_empty())
        .map(RawMod::from)
        .collect()
}
