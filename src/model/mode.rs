use serde::Serializer;

pub use rosu_map::section::general::GameMode;

/// Conversions between a [`GameMode`] and the numeric mode id used by
/// callers (0 = osu!, 1 = taiko, 2 = catch, 3 = mania).
pub trait GameModeExt: Sized {
    /// Resolve a numeric mode id, `None` if it is not one of the four modes.
    fn from_id(id: u8) -> Option<Self>;

    /// The numeric mode id.
    fn id(self) -> u8;
}

impl GameModeExt for GameMode {
    fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Osu),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }

    fn id(self) -> u8 {
        match self {
            Self::Osu => 0,
            Self::Taiko => 1,
            Self::Catch => 2,
            Self::Mania => 3,
        }
    }
}

/// The same mode as understood by `rosu-mods`.
pub(crate) const fn mods_mode(mode: GameMode) -> rosu_mods::GameMode {
    match mode {
        GameMode::Osu => rosu_mods::GameMode::Osu,
        GameMode::Taiko => rosu_mods::GameMode::Taiko,
        GameMode::Catch => rosu_mods::GameMode::Catch,
        GameMode::Mania => rosu_mods::GameMode::Mania,
    }
}

pub(crate) fn serialize_mode<S: Serializer>(mode: &GameMode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(mode.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip() {
        for id in 0..4 {
            let mode = GameMode::from_id(id).unwrap();
            assert_eq!(mode.id(), id);
        }
    }

    #[test]
    fn unknown_id() {
        assert!(GameMode::from_id(4).is_none());
        assert!(GameMode::from_id(u8::MAX).is_none());
    }
}
