//! Bridge wire protocol.
//!
//! Every command is a fixed size datagram: an opcode, a parameter byte and a terminator.

use core::fmt::{Debug, Display};

use self::types::{Group, Percent};

pub mod types;

/// Last byte of every command.
const TERMINATOR: u8 = 0x55;
/// Parameter byte for commands without arguments.
const NO_PARAM: u8 = 0x00;

const DISCO_SLOWER: u8 = 0x43;
const DISCO_FASTER: u8 = 0x44;
const DISCO_ON: u8 = 0x4D;
const BRIGHTNESS: u8 = 0x4E;
const COLOR: u8 = 0x40;

/// Opcode tables indexed by the group number.
const ON_OPCODES: [u8; 5] = [0x42, 0x45, 0x47, 0x49, 0x4B];
const OFF_OPCODES: [u8; 5] = [0x41, 0x46, 0x48, 0x4A, 0x4C];
const WHITE_OPCODES: [u8; 5] = [0xC2, 0xC5, 0xC7, 0xC9, 0xCB];

/// A single bridge command ready to be sent.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command([u8; Command::PACKED_LEN]);

impl Command {
    /// Length of the encoded command in bytes.
    pub const PACKED_LEN: usize = 3;

    const fn new(opcode: u8, param: u8) -> Self {
        Self([opcode, param, TERMINATOR])
    }

    const fn for_group(table: &[u8; 5], group: Group) -> Self {
        Self::new(table[group.number() as usize], NO_PARAM)
    }

    /// Switches the lamps of the given group on.
    pub const fn on(group: Group) -> Self {
        Self::for_group(&ON_OPCODES, group)
    }

    /// Switches the lamps of the given group off.
    pub const fn off(group: Group) -> Self {
        Self::for_group(&OFF_OPCODES, group)
    }

    /// Puts the lamps of the given group into the white mode.
    pub const fn white(group: Group) -> Self {
        Self::for_group(&WHITE_OPCODES, group)
    }

    /// Sets the brightness of the most recently selected group.
    ///
    /// The level is sent as is, the bridge expects it to be within `[2, 27]`.
    pub const fn brightness(level: u8) -> Self {
        Self::new(BRIGHTNESS, level)
    }

    /// Sets the hue of the most recently selected group.
    pub const fn color(hue: u8) -> Self {
        Self::new(COLOR, hue)
    }

    pub const fn disco_slower() -> Self {
        Self::new(DISCO_SLOWER, NO_PARAM)
    }

    pub const fn disco_faster() -> Self {
        Self::new(DISCO_FASTER, NO_PARAM)
    }

    pub const fn disco_on() -> Self {
        Self::new(DISCO_ON, NO_PARAM)
    }

    /// Brightness command for the given fraction of the full brightness.
    pub fn brightness_percent(percent: Percent) -> Self {
        Self::brightness(percent.brightness_level())
    }

    /// Color command for the given fraction of the bridge color wheel.
    pub fn color_percent(percent: Percent) -> Self {
        Self::color(percent.hue_byte())
    }

    /// Returns the encoded bytes.
    pub const fn to_bytes(self) -> [u8; Self::PACKED_LEN] {
        self.0
    }

    pub const fn opcode(self) -> u8 {
        self.0[0]
    }

    pub const fn param(self) -> u8 {
        self.0[1]
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Command({self})")
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [opcode, param, terminator] = self.0;
        write!(f, "{opcode:#04X} {param:#04X} {terminator:#04X}")
    }
}

#[cfg(test)]
mod tests {
    use super::{types::Group, Command};
    use crate::proto::types::Percent;

    #[test]
    fn test_group_commands_table() {
        let on = Group::VALUES.map(|group| Command::on(group).to_bytes());
        assert_eq!(
            on,
            [
                [0x42, 0x00, 0x55],
                [0x45, 0x00, 0x55],
                [0x47, 0x00, 0x55],
                [0x49, 0x00, 0x55],
                [0x4B, 0x00, 0x55],
            ]
        );

        let off = Group::VALUES.map(|group| Command::off(group).to_bytes());
        assert_eq!(
            off,
            [
                [0x41, 0x00, 0x55],
                [0x46, 0x00, 0x55],
                [0x48, 0x00, 0x55],
                [0x4A, 0x00, 0x55],
                [0x4C, 0x00, 0x55],
            ]
        );

        let white = Group::VALUES.map(|group| Command::white(group).opcode());
        assert_eq!(white, [0xC2, 0xC5, 0xC7, 0xC9, 0xCB]);
    }

    #[test]
    fn test_group_commands_are_distinct() {
        for (i, a) in Group::VALUES.iter().enumerate() {
            for b in &Group::VALUES[i + 1..] {
                assert_ne!(Command::on(*a), Command::on(*b));
                assert_ne!(Command::off(*a), Command::off(*b));
            }
        }
    }

    #[test]
    fn test_unknown_group_falls_back_to_all() {
        for number in [5_u8, 42, u8::MAX] {
            let group = Group::from(number);
            assert_eq!(Command::on(group), Command::on(Group::All));
            assert_eq!(Command::off(group), Command::off(Group::All));
            assert_eq!(Command::white(group), Command::white(Group::All));
        }
    }

    #[test]
    fn test_parametrized_commands() {
        assert_eq!(Command::brightness(27).to_bytes(), [0x4E, 0x1B, 0x55]);
        assert_eq!(Command::color(0xFF).to_bytes(), [0x40, 0xFF, 0x55]);
        assert_eq!(
            Command::brightness_percent(Percent::new(0.5).unwrap()).to_bytes(),
            [0x4E, 0x0F, 0x55]
        );
        assert_eq!(
            Command::color_percent(Percent::FULL).to_bytes(),
            [0x40, 0xFF, 0x55]
        );
    }

    #[test]
    fn test_disco_commands() {
        assert_eq!(Command::disco_slower().to_bytes(), [0x43, 0x00, 0x55]);
        assert_eq!(Command::disco_faster().to_bytes(), [0x44, 0x00, 0x55]);
        assert_eq!(Command::disco_on().to_bytes(), [0x4D, 0x00, 0x55]);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::on(Group::One).to_string(), "0x45 0x00 0x55");
    }
}
