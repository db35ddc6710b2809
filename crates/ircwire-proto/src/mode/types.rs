use bitflags::bitflags;

/// Letter mapping shared by [`UserMode`] and [`ChannelMode`].
pub trait ModeType: Copy + Eq + Default + 'static {
    /// Every flag with its letter, in canonical output order.
    const LETTERS: &'static [(char, Self)];

    /// Whether no flag is set.
    fn is_none(&self) -> bool;

    /// Union in place.
    fn add(&mut self, other: Self);

    /// Whether every flag of `other` is set.
    fn has(&self, other: Self) -> bool;

    /// Whether `flag` consumes a parameter token when set or cleared.
    fn takes_param(_flag: Self, _adding: bool) -> bool {
        false
    }

    /// The flag for a single letter.
    fn from_letter(c: char) -> Option<Self> {
        Self::LETTERS
            .iter()
            .find(|(letter, _)| *letter == c)
            .map(|(_, flag)| *flag)
    }

    /// Parses a letter string, rejecting it if any letter is unknown.
    fn try_from_letters(s: &str) -> Option<Self> {
        let mut set = Self::default();
        for c in s.chars() {
            set.add(Self::from_letter(c)?);
        }
        Some(set)
    }

    /// Parses a letter string, skipping unknown letters with a warning.
    fn from_letters(s: &str) -> Self {
        let mut set = Self::default();
        for c in s.chars() {
            match Self::from_letter(c) {
                Some(flag) => set.add(flag),
                None => tracing::warn!(letter = %c, modes = s, "skipping unknown mode letter"),
            }
        }
        set
    }

    /// The set as letters in canonical order.
    fn letters(&self) -> String {
        Self::LETTERS
            .iter()
            .filter(|(_, flag)| self.has(*flag))
            .map(|(letter, _)| *letter)
            .collect()
    }
}

bitflags! {
    /// User modes, including a few common network extensions.
    ///
    /// Bit positions match the RFC 2812 `USER` mask: `8` is invisible and
    /// `4` is wallops.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct UserMode: u16 {
        /// `w`
        const WALLOPS = 1 << 2;
        /// `i`
        const INVISIBLE = 1 << 3;
        /// `a`
        const AWAY = 1 << 4;
        /// `r`
        const RESTRICTED = 1 << 5;
        /// `o`
        const OPERATOR = 1 << 6;
        /// `O`
        const LOCAL_OPERATOR = 1 << 7;
        /// `s`
        const SERVER_NOTICES = 1 << 8;
        /// `g` (caller ID)
        const IGNORE_UNKNOWN = 1 << 9;
        /// `Q`
        const DISABLE_FORWARDING = 1 << 10;
        /// `R`
        const BLOCK_UNIDENTIFIED = 1 << 11;
        /// `Z`
        const SECURE = 1 << 12;
        /// `x`
        const HIDE_HOST = 1 << 13;
    }
}

impl ModeType for UserMode {
    const LETTERS: &'static [(char, Self)] = &[
        ('w', Self::WALLOPS),
        ('i', Self::INVISIBLE),
        ('a', Self::AWAY),
        ('r', Self::RESTRICTED),
        ('o', Self::OPERATOR),
        ('O', Self::LOCAL_OPERATOR),
        ('s', Self::SERVER_NOTICES),
        ('g', Self::IGNORE_UNKNOWN),
        ('Q', Self::DISABLE_FORWARDING),
        ('R', Self::BLOCK_UNIDENTIFIED),
        ('Z', Self::SECURE),
        ('x', Self::HIDE_HOST),
    ];

    fn is_none(&self) -> bool {
        self.is_empty()
    }

    fn add(&mut self, other: Self) {
        self.insert(other);
    }

    fn has(&self, other: Self) -> bool {
        self.contains(other)
    }
}

impl UserMode {
    /// The numeric `USER` mask form. Unknown bits are dropped.
    pub fn from_mask(mask: u16) -> Self {
        Self::from_bits_truncate(mask)
    }

    /// The numeric `USER` mask form.
    pub fn mask(&self) -> u16 {
        self.bits()
    }
}

bitflags! {
    /// Channel modes from RFC 1459.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ChannelMode: u16 {
        /// `o`
        const OPERATOR = 1 << 0;
        /// `p`
        const PRIVATE = 1 << 1;
        /// `s`
        const SECRET = 1 << 2;
        /// `i`
        const INVITE_ONLY = 1 << 3;
        /// `t`
        const TOPIC_OPS_ONLY = 1 << 4;
        /// `n`
        const NO_OUTSIDE = 1 << 5;
        /// `m`
        const MODERATED = 1 << 6;
        /// `l`
        const USER_LIMIT = 1 << 7;
        /// `b`
        const BAN_MASK = 1 << 8;
        /// `v`
        const VOICE = 1 << 9;
        /// `k`
        const KEY = 1 << 10;
    }
}

impl ModeType for ChannelMode {
    fn takes_param(flag: Self, adding: bool) -> bool {
        if flag == Self::USER_LIMIT {
            return adding;
        }
        (Self::OPERATOR | Self::VOICE | Self::BAN_MASK | Self::KEY).contains(flag)
    }

    const LETTERS: &'static [(char, Self)] = &[
        ('o', Self::OPERATOR),
        ('p', Self::PRIVATE),
        ('s', Self::SECRET),
        ('i', Self::INVITE_ONLY),
        ('t', Self::TOPIC_OPS_ONLY),
        ('n', Self::NO_OUTSIDE),
        ('m', Self::MODERATED),
        ('l', Self::USER_LIMIT),
        ('b', Self::BAN_MASK),
        ('v', Self::VOICE),
        ('k', Self::KEY),
    ];

    fn is_none(&self) -> bool {
        self.is_empty()
    }

    fn add(&mut self, other: Self) {
        self.insert(other);
    }

    fn has(&self, other: Self) -> bool {
        self.contains(other)
    }
}

impl ChannelMode {
    /// Builds a set from its raw bits. Unknown bits are dropped.
    pub fn from_mask(mask: u16) -> Self {
        Self::from_bits_truncate(mask)
    }
}
