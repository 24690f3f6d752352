/// Relationship category derived from a contact's level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipCategory {
    CloseFriends,
    Classmates,
    BatchMates,
    Colleagues,
    ExtendedNetwork,
    Other,
}

impl RelationshipCategory {
    pub const RANKED: [Self; 5] = [
        Self::CloseFriends,
        Self::Classmates,
        Self::BatchMates,
        Self::Colleagues,
        Self::ExtendedNetwork,
    ];

    pub fn from_level(level: i32) -> Self {
        match level {
            1 => Self::CloseFriends,
            2 => Self::Classmates,
            3 => Self::BatchMates,
            4 => Self::Colleagues,
            5 => Self::ExtendedNetwork,
            _ => Self::Other,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::CloseFriends => [0xE9, 0x1E, 0x63],
            Self::Classmates => [0x9C, 0x27, 0xB0],
            Self::BatchMates => [0x3F, 0x51, 0xB5],
            Self::Colleagues => [0x00, 0x96, 0x88],
            Self::ExtendedNetwork => [0x4C, 0xAF, 0x50],
            Self::Other => [0x62, 0x00, 0xEE],
        }
    }

    /// Display label for a tier; `Other` needs the level to render.
    pub fn label(self, level: i32) -> String {
        match self {
            Self::CloseFriends => "Close Friends".to_owned(),
            Self::Classmates => "Classmates".to_owned(),
            Self::BatchMates => "Batch Mates".to_owned(),
            Self::Colleagues => "Colleagues".to_owned(),
            Self::ExtendedNetwork => "Extended Network".to_owned(),
            Self::Other => format!("Level {level}"),
        }
    }
}
