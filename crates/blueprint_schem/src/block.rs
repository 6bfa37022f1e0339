//! Typed blocks.
//!
//! Every cell of a [`Slice`](crate::Slice) holds a [`Block`]: the numeric id
//! and data value read from the file, plus a [`BlockKind`] payload for blocks
//! whose state does not fit in those two numbers.

use std::fmt;

use crate::item::Item;
use crate::redstone::WireShape;
use crate::registry;
use crate::BlockError;

pub const AIR_ID: u8 = 0;
pub const TORCH_ID: u8 = 50;
pub const REDSTONE_WIRE_ID: u8 = 55;
pub const REDSTONE_TORCH_OFF_ID: u8 = 75;
pub const REDSTONE_TORCH_ON_ID: u8 = 76;

/// The largest value that fits in the 4-bit data nibble.
pub const MAX_DATA: u8 = 0xf;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub id: u8,
    pub data: u8,
    pub kind: BlockKind,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BlockKind {
    Plain,
    /// A torch, oriented by its data value.
    Torch,
    RedstoneTorch(RedstoneTorch),
    /// Redstone dust. The power level is the data value.
    RedstoneWire(RedstoneWire),
    Container(Container),
    Sign(Sign),
    Note(Note),
    BrewingStand(BrewingStand),
    CommandBlock(CommandBlock),
    Beacon(Beacon),
    MobHead(MobHead),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RedstoneTorch {
    pub on: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct RedstoneWire {
    /// Derived from the neighboring cells after decoding. Not stored on disk.
    pub shape: WireShape,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ContainerKind {
    Chest,
    TrappedChest,
    Dispenser,
    Hopper,
    Dropper,
}

impl ContainerKind {
    pub const fn capacity(self) -> usize {
        match self {
            Self::Chest | Self::TrappedChest => 27,
            Self::Dispenser | Self::Dropper => 9,
            Self::Hopper => 5,
        }
    }

    /// The `id` its tile entity is stored with.
    pub const fn tile_entity(self) -> &'static str {
        match self {
            Self::Chest | Self::TrappedChest => "Chest",
            Self::Dispenser => "Trap",
            Self::Hopper => "Hopper",
            Self::Dropper => "Dropper",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Container {
    pub kind: ContainerKind,
    /// Always exactly [`ContainerKind::capacity`] entries. Unused slots hold
    /// [`Item::EMPTY`].
    pub items: Box<[Item]>,
}

impl Container {
    pub fn empty(kind: ContainerKind) -> Self {
        Self {
            kind,
            items: vec![Item::EMPTY; kind.capacity()].into_boxed_slice(),
        }
    }

    pub fn occupied_slots(&self) -> usize {
        self.items.iter().filter(|item| !item.is_empty()).count()
    }
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Sign {
    pub lines: [String; 4],
    /// Wall signs (id 68) are oriented by their data value; standing signs
    /// (id 63) by a 16-step rotation.
    pub wall: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Note {
    /// Number of right clicks past F#, 0..=24.
    pub pitch: i8,
}

pub const BREWING_STAND_SLOTS: usize = 4;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BrewingStand {
    /// Three bottle slots and the ingredient slot.
    pub items: [Item; BREWING_STAND_SLOTS],
    /// Ticks left until the current brew completes.
    pub brew_time: i32,
}

impl Default for BrewingStand {
    fn default() -> Self {
        Self {
            items: [Item::EMPTY; BREWING_STAND_SLOTS],
            brew_time: 0,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct CommandBlock {
    pub command: String,
    /// Output signal strength of the last run.
    pub success_count: i32,
}

/// An unlit beacon has every field at zero.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Beacon {
    /// Number of pyramid levels below the beacon, 0..=4.
    pub levels: i32,
    /// Potion effect id, 0 when unset.
    pub primary: i32,
    pub secondary: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SkullType {
    Skeleton,
    WitherSkeleton,
    Zombie,
    Human,
    Creeper,
}

impl SkullType {
    pub fn from_raw(raw: i8) -> Result<Self, BlockError> {
        Ok(match raw {
            0 => Self::Skeleton,
            1 => Self::WitherSkeleton,
            2 => Self::Zombie,
            3 => Self::Human,
            4 => Self::Creeper,
            _ => return Err(BlockError::UnknownSkullType(raw)),
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Skeleton => "Skeleton",
            Self::WitherSkeleton => "Wither Skeleton",
            Self::Zombie => "Zombie",
            Self::Human => "Human",
            Self::Creeper => "Creeper",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MobHead {
    pub skull_type: SkullType,
    /// 16-step rotation used when the head stands on the floor.
    pub rotation: u8,
    /// Player name for human heads.
    pub owner: Option<String>,
}

impl Default for MobHead {
    fn default() -> Self {
        Self {
            skull_type: SkullType::Human,
            rotation: Direction::North.rotation().unwrap_or_default(),
            owner: None,
        }
    }
}

/// A horizontal compass direction with 16 steps, or none at all.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum Direction {
    #[default]
    None,
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl Direction {
    /// Directions by rotation step, starting at south and turning clockwise.
    const BY_ROTATION: [Self; 16] = [
        Self::South,
        Self::SouthSouthWest,
        Self::SouthWest,
        Self::WestSouthWest,
        Self::West,
        Self::WestNorthWest,
        Self::NorthWest,
        Self::NorthNorthWest,
        Self::North,
        Self::NorthNorthEast,
        Self::NorthEast,
        Self::EastNorthEast,
        Self::East,
        Self::EastSouthEast,
        Self::SouthEast,
        Self::SouthSouthEast,
    ];

    /// Converts a 16-step rotation as used by standing signs and floor
    /// heads. Only the low four bits are used.
    pub const fn from_rotation(rotation: u8) -> Self {
        Self::BY_ROTATION[(rotation & 0xf) as usize]
    }

    /// The inverse of [`Self::from_rotation`].
    pub fn rotation(self) -> Option<u8> {
        Self::BY_ROTATION
            .iter()
            .position(|&dir| dir == self)
            .map(|step| step as u8)
    }

    /// The direction a wall sign or wall head with the given data value
    /// faces.
    pub const fn from_wall_data(data: u8) -> Self {
        match data {
            2 => Self::North,
            3 => Self::South,
            4 => Self::West,
            5 => Self::East,
            _ => Self::None,
        }
    }

    /// The direction a torch with the given data value points. Torches
    /// standing on the floor have no direction.
    pub const fn from_torch_data(data: u8) -> Self {
        match data {
            1 => Self::East,
            2 => Self::West,
            3 => Self::South,
            4 => Self::North,
            _ => Self::None,
        }
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::North => "N",
            Self::NorthNorthEast => "NNE",
            Self::NorthEast => "NE",
            Self::EastNorthEast => "ENE",
            Self::East => "E",
            Self::EastSouthEast => "ESE",
            Self::SouthEast => "SE",
            Self::SouthSouthEast => "SSE",
            Self::South => "S",
            Self::SouthSouthWest => "SSW",
            Self::SouthWest => "SW",
            Self::WestSouthWest => "WSW",
            Self::West => "W",
            Self::WestNorthWest => "WNW",
            Self::NorthWest => "NW",
            Self::NorthNorthWest => "NNW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Block {
    pub const AIR: Self = Self {
        id: AIR_ID,
        data: 0,
        kind: BlockKind::Plain,
    };

    /// Creates a block, rejecting data values that do not fit in a nibble.
    pub fn new(id: u8, data: u8, kind: BlockKind) -> Result<Self, BlockError> {
        if data > MAX_DATA {
            return Err(BlockError::InvalidData { id, data });
        }

        Ok(Self { id, data, kind })
    }

    pub fn is_air(&self) -> bool {
        self.id == AIR_ID
    }

    /// The display name from the block registry.
    pub fn name(&self) -> &'static str {
        registry::name(self.id).unwrap_or("Unknown Block")
    }

    pub fn facing(&self) -> Direction {
        match &self.kind {
            BlockKind::Torch | BlockKind::RedstoneTorch(_) => Direction::from_torch_data(self.data),
            BlockKind::Sign(Sign { wall: true, .. }) => Direction::from_wall_data(self.data),
            BlockKind::Sign(Sign { wall: false, .. }) => Direction::from_rotation(self.data),
            // Data 1 means the head stands on the floor and uses its own
            // rotation. Other values are wall mounts.
            BlockKind::MobHead(head) if self.data == 1 => Direction::from_rotation(head.rotation),
            BlockKind::MobHead(_) => Direction::from_wall_data(self.data),
            _ => Direction::None,
        }
    }

    /// A short human-readable description of the block and its state.
    pub fn tooltip(&self) -> String {
        let name = self.name();

        let mut text = match &self.kind {
            BlockKind::Plain | BlockKind::Torch => name.to_owned(),
            BlockKind::RedstoneTorch(torch) => {
                let state = if torch.on { "burning" } else { "not burning" };
                format!("{name}, {state}")
            }
            BlockKind::RedstoneWire(_) => format!("{name}, strength {}", self.data),
            BlockKind::Container(container) => format!(
                "{name}, {} of {} slots used",
                container.occupied_slots(),
                container.items.len()
            ),
            BlockKind::Sign(sign) => {
                let mut text = name.to_owned();
                for line in sign.lines.iter().filter(|line| !line.is_empty()) {
                    text.push('\n');
                    text.push_str(line);
                }
                text
            }
            BlockKind::Note(note) => format!("{name}, pitch {}", note.pitch),
            BlockKind::BrewingStand(stand) => format!("{name}, brew time {}", stand.brew_time),
            BlockKind::CommandBlock(cmd) if cmd.command.is_empty() => name.to_owned(),
            BlockKind::CommandBlock(cmd) => format!("{name}: {}", cmd.command),
            BlockKind::Beacon(beacon) => format!(
                "{name}, {} levels, primary effect {}, secondary effect {}",
                beacon.levels, beacon.primary, beacon.secondary
            ),
            BlockKind::MobHead(head) => match &head.owner {
                Some(owner) => format!("{} Head of {owner}", head.skull_type.name()),
                None => format!("{} Head", head.skull_type.name()),
            },
        };

        let facing = self.facing();
        if facing != Direction::None {
            text.push_str(&format!(", facing {facing}"));
        }

        text
    }

    /// Changes the data value. Fails without changing anything if `data`
    /// does not fit in a nibble.
    pub fn set_data(&mut self, data: u8) -> Result<(), BlockError> {
        if data > MAX_DATA {
            return Err(BlockError::InvalidData { id: self.id, data });
        }

        self.data = data;
        Ok(())
    }

    /// Lights or extinguishes a redstone torch, switching between ids 75 and
    /// 76. Returns `false` for every other block.
    pub fn set_torch_lit(&mut self, on: bool) -> bool {
        let BlockKind::RedstoneTorch(torch) = &mut self.kind else {
            return false;
        };

        torch.on = on;
        self.id = if on {
            REDSTONE_TORCH_ON_ID
        } else {
            REDSTONE_TORCH_OFF_ID
        };
        true
    }

    /// Power level of redstone wire.
    pub fn wire_strength(&self) -> Option<u8> {
        matches!(self.kind, BlockKind::RedstoneWire(_)).then_some(self.data)
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::AIR
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name(), self.id, self.data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rotation_steps() {
        assert_eq!(Direction::from_rotation(0), Direction::South);
        assert_eq!(Direction::from_rotation(4), Direction::West);
        assert_eq!(Direction::from_rotation(8), Direction::North);
        assert_eq!(Direction::from_rotation(12), Direction::East);
        assert_eq!(Direction::from_rotation(15), Direction::SouthSouthEast);
        assert_eq!(Direction::from_rotation(16 + 2), Direction::SouthWest);

        for step in 0..16 {
            assert_eq!(Direction::from_rotation(step).rotation(), Some(step));
        }
        assert_eq!(Direction::None.rotation(), None);
    }

    #[test]
    fn sign_facing() {
        let wall = |data| Block {
            id: 68,
            data,
            kind: BlockKind::Sign(Sign {
                wall: true,
                ..Default::default()
            }),
        };

        assert_eq!(wall(2).facing(), Direction::North);
        assert_eq!(wall(3).facing(), Direction::South);
        assert_eq!(wall(4).facing(), Direction::West);
        assert_eq!(wall(5).facing(), Direction::East);
        assert_eq!(wall(0).facing(), Direction::None);

        let standing = Block {
            id: 63,
            data: 6,
            kind: BlockKind::Sign(Sign::default()),
        };
        assert_eq!(standing.facing(), Direction::NorthWest);
    }

    #[test]
    fn torch_facing() {
        let torch = |data| Block::new(TORCH_ID, data, BlockKind::Torch).unwrap();

        assert_eq!(torch(1).facing(), Direction::East);
        assert_eq!(torch(2).facing(), Direction::West);
        assert_eq!(torch(3).facing(), Direction::South);
        assert_eq!(torch(4).facing(), Direction::North);
        assert_eq!(torch(5).facing(), Direction::None);
    }

    #[test]
    fn floor_head_uses_rotation() {
        let head = Block {
            id: 144,
            data: 1,
            kind: BlockKind::MobHead(MobHead {
                rotation: 4,
                ..Default::default()
            }),
        };
        assert_eq!(head.facing(), Direction::West);

        let on_wall = Block { data: 3, ..head };
        assert_eq!(on_wall.facing(), Direction::South);
    }

    #[test]
    fn default_head_is_human_facing_north() {
        let head = MobHead::default();

        assert_eq!(head.skull_type, SkullType::Human);
        assert_eq!(Direction::from_rotation(head.rotation), Direction::North);
    }

    #[test]
    fn data_must_fit_in_a_nibble() {
        assert_eq!(
            Block::new(1, 16, BlockKind::Plain),
            Err(BlockError::InvalidData { id: 1, data: 16 })
        );

        let mut wire = Block::new(
            REDSTONE_WIRE_ID,
            3,
            BlockKind::RedstoneWire(RedstoneWire::default()),
        )
        .unwrap();

        assert!(wire.set_data(16).is_err());
        assert_eq!(wire.wire_strength(), Some(3));

        wire.set_data(15).unwrap();
        assert_eq!(wire.wire_strength(), Some(15));
    }

    #[test]
    fn lighting_a_torch_changes_its_id() {
        let mut torch = Block {
            id: REDSTONE_TORCH_OFF_ID,
            data: 5,
            kind: BlockKind::RedstoneTorch(RedstoneTorch { on: false }),
        };

        assert!(torch.set_torch_lit(true));
        assert_eq!(torch.id, REDSTONE_TORCH_ON_ID);
        assert_eq!(torch.kind, BlockKind::RedstoneTorch(RedstoneTorch { on: true }));

        assert!(torch.set_torch_lit(false));
        assert_eq!(torch.id, REDSTONE_TORCH_OFF_ID);

        assert!(!Block::AIR.clone().set_torch_lit(true));
    }

    #[test]
    fn tooltips() {
        assert_eq!(Block::AIR.tooltip(), "Air");

        let chest = Block {
            id: 54,
            data: 0,
            kind: BlockKind::Container(Container::empty(ContainerKind::Chest)),
        };
        assert_eq!(chest.tooltip(), "Chest, 0 of 27 slots used");

        let sign = Block {
            id: 68,
            data: 2,
            kind: BlockKind::Sign(Sign {
                lines: ["Welcome".into(), String::new(), "home".into(), String::new()],
                wall: true,
            }),
        };
        assert_eq!(sign.tooltip(), "Wall Sign\nWelcome\nhome, facing N");

        let head = Block {
            id: 144,
            data: 2,
            kind: BlockKind::MobHead(MobHead {
                owner: Some("Notch".into()),
                ..Default::default()
            }),
        };
        assert_eq!(head.tooltip(), "Human Head of Notch, facing N");
    }

    #[test]
    fn display() {
        let wool = Block::new(35, 14, BlockKind::Plain).unwrap();

        assert_eq!(wool.to_string(), "Wool (35:14)");
    }
}
