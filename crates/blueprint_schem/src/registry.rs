//! Mapping block ids and data values to [`Block`]s.
//!
//! Ordinary ids go through [`resolve`]. Ids whose state lives in a tile entity
//! have a row in [`SPECIAL_BLOCKS`] that builds the block from its data value
//! and the tile entity, if the file has one.

use blueprint_nbt::{Compound, List, Value};

use crate::block::{
    Beacon, Block, BlockKind, BrewingStand, CommandBlock, Container, ContainerKind, MobHead, Note,
    RedstoneTorch, RedstoneWire, Sign, SkullType, REDSTONE_TORCH_ON_ID,
};
use crate::field::{optional, required};
use crate::item::Item;
use crate::BlockError;

/// Display names indexed by block id.
pub const BLOCK_NAMES: [&str; 176] = [
    "Air",
    "Stone",
    "Grass",
    "Dirt",
    "Cobblestone",
    "Wooden Planks",
    "Sapling",
    "Bedrock",
    "Flowing Water",
    "Water",
    "Flowing Lava",
    "Lava",
    "Sand",
    "Gravel",
    "Gold Ore",
    "Iron Ore",
    "Coal Ore",
    "Wood",
    "Leaves",
    "Sponge",
    "Glass",
    "Lapis Lazuli Ore",
    "Lapis Lazuli Block",
    "Dispenser",
    "Sandstone",
    "Note Block",
    "Bed",
    "Powered Rail",
    "Detector Rail",
    "Sticky Piston",
    "Cobweb",
    "Tall Grass",
    "Dead Bush",
    "Piston",
    "Piston Head",
    "Wool",
    "Moving Piston",
    "Dandelion",
    "Poppy",
    "Brown Mushroom",
    "Red Mushroom",
    "Block of Gold",
    "Block of Iron",
    "Double Stone Slab",
    "Stone Slab",
    "Bricks",
    "TNT",
    "Bookshelf",
    "Moss Stone",
    "Obsidian",
    "Torch",
    "Fire",
    "Monster Spawner",
    "Oak Wood Stairs",
    "Chest",
    "Redstone Wire",
    "Diamond Ore",
    "Block of Diamond",
    "Crafting Table",
    "Wheat",
    "Farmland",
    "Furnace",
    "Burning Furnace",
    "Sign",
    "Wooden Door",
    "Ladder",
    "Rail",
    "Cobblestone Stairs",
    "Wall Sign",
    "Lever",
    "Stone Pressure Plate",
    "Iron Door",
    "Wooden Pressure Plate",
    "Redstone Ore",
    "Glowing Redstone Ore",
    "Redstone Torch (off)",
    "Redstone Torch",
    "Stone Button",
    "Snow",
    "Ice",
    "Snow Block",
    "Cactus",
    "Clay",
    "Sugar Cane",
    "Jukebox",
    "Fence",
    "Pumpkin",
    "Netherrack",
    "Soul Sand",
    "Glowstone",
    "Nether Portal",
    "Jack o'Lantern",
    "Cake",
    "Redstone Repeater (off)",
    "Redstone Repeater (on)",
    "Stained Glass",
    "Trapdoor",
    "Monster Egg",
    "Stone Bricks",
    "Huge Brown Mushroom",
    "Huge Red Mushroom",
    "Iron Bars",
    "Glass Pane",
    "Melon",
    "Pumpkin Stem",
    "Melon Stem",
    "Vines",
    "Fence Gate",
    "Brick Stairs",
    "Stone Brick Stairs",
    "Mycelium",
    "Lily Pad",
    "Nether Brick",
    "Nether Brick Fence",
    "Nether Brick Stairs",
    "Nether Wart",
    "Enchantment Table",
    "Brewing Stand",
    "Cauldron",
    "End Portal",
    "End Portal Frame",
    "End Stone",
    "Dragon Egg",
    "Redstone Lamp (off)",
    "Redstone Lamp (on)",
    "Double Wooden Slab",
    "Wooden Slab",
    "Cocoa",
    "Sandstone Stairs",
    "Emerald Ore",
    "Ender Chest",
    "Tripwire Hook",
    "Tripwire",
    "Block of Emerald",
    "Spruce Wood Stairs",
    "Birch Wood Stairs",
    "Jungle Wood Stairs",
    "Command Block",
    "Beacon",
    "Cobblestone Wall",
    "Flower Pot",
    "Carrots",
    "Potatoes",
    "Wooden Button",
    "Mob Head",
    "Anvil",
    "Trapped Chest",
    "Weighted Pressure Plate (Light)",
    "Weighted Pressure Plate (Heavy)",
    "Redstone Comparator (off)",
    "Redstone Comparator (on)",
    "Daylight Sensor",
    "Block of Redstone",
    "Nether Quartz Ore",
    "Hopper",
    "Block of Quartz",
    "Quartz Stairs",
    "Activator Rail",
    "Dropper",
    "Stained Clay",
    "Stained Glass Pane",
    "Acacia Leaves",
    "Acacia Wood",
    "Acacia Wood Stairs",
    "Dark Oak Wood Stairs",
    "Slime Block",
    "Barrier",
    "Iron Trapdoor",
    "Prismarine",
    "Sea Lantern",
    "Hay Bale",
    "Carpet",
    "Hardened Clay",
    "Block of Coal",
    "Packed Ice",
    "Large Flowers",
];

pub fn name(id: u8) -> Option<&'static str> {
    BLOCK_NAMES.get(usize::from(id)).copied()
}

/// Resolves an ordinary block.
///
/// Special ids resolve to their plain form here. The decoder sends them
/// through [`special`] instead.
pub fn resolve(id: u8, data: u8) -> Result<Block, BlockError> {
    if name(id).is_none() {
        return Err(BlockError::UnknownBlock(id));
    }

    let kind = match id {
        50 => BlockKind::Torch,
        55 => BlockKind::RedstoneWire(RedstoneWire::default()),
        75 | 76 => BlockKind::RedstoneTorch(RedstoneTorch {
            on: id == REDSTONE_TORCH_ON_ID,
        }),
        _ => BlockKind::Plain,
    };

    Block::new(id, data, kind)
}

/// Builds a special block from its data value and tile entity.
pub type BuildFn = fn(u8, Option<&Compound>) -> Result<Block, BlockError>;

/// One row of the special block table.
#[derive(Clone, Copy)]
pub struct SpecialBlock {
    pub id: u8,
    /// The `id` string of the matching tile entity.
    pub tile_entity: &'static str,
    /// Called with `None` when the file has no tile entity for the cell.
    pub build: BuildFn,
}

/// Every block id whose state is stored in a tile entity.
pub const SPECIAL_BLOCKS: &[SpecialBlock] = &[
    SpecialBlock {
        id: 23,
        tile_entity: ContainerKind::Dispenser.tile_entity(),
        build: |data, te| container(23, ContainerKind::Dispenser, data, te),
    },
    SpecialBlock {
        id: 25,
        tile_entity: "Music",
        build: note,
    },
    SpecialBlock {
        id: 54,
        tile_entity: ContainerKind::Chest.tile_entity(),
        build: |data, te| container(54, ContainerKind::Chest, data, te),
    },
    SpecialBlock {
        id: 63,
        tile_entity: "Sign",
        build: |data, te| sign(63, data, te),
    },
    SpecialBlock {
        id: 68,
        tile_entity: "Sign",
        build: |data, te| sign(68, data, te),
    },
    SpecialBlock {
        id: 117,
        tile_entity: "Cauldron",
        build: brewing_stand,
    },
    SpecialBlock {
        id: 137,
        tile_entity: "Control",
        build: command_block,
    },
    SpecialBlock {
        id: 138,
        tile_entity: "Beacon",
        build: beacon,
    },
    SpecialBlock {
        id: 144,
        tile_entity: "Skull",
        build: mob_head,
    },
    SpecialBlock {
        id: 146,
        tile_entity: ContainerKind::TrappedChest.tile_entity(),
        build: |data, te| container(146, ContainerKind::TrappedChest, data, te),
    },
    SpecialBlock {
        id: 154,
        tile_entity: ContainerKind::Hopper.tile_entity(),
        build: |data, te| container(154, ContainerKind::Hopper, data, te),
    },
    SpecialBlock {
        id: 158,
        tile_entity: ContainerKind::Dropper.tile_entity(),
        build: |data, te| container(158, ContainerKind::Dropper, data, te),
    },
];

/// Looks up the special block row for `id`.
pub fn special(id: u8) -> Option<&'static SpecialBlock> {
    SPECIAL_BLOCKS.iter().find(|row| row.id == id)
}

/// Reads an `Items` list into `slots`. A missing list leaves every slot
/// empty.
fn read_items(te: &Compound, slots: &mut [Item]) -> Result<(), BlockError> {
    let Some(records) = optional(te, "Items", "list of compounds", |v| {
        v.as_list().and_then(List::as_compounds)
    })?
    else {
        return Ok(());
    };

    for record in records {
        let (slot, item) = Item::from_record(record)?;

        let Some(dest) = usize::try_from(slot).ok().and_then(|s| slots.get_mut(s)) else {
            return Err(BlockError::SlotOutOfRange {
                slot,
                capacity: slots.len(),
            });
        };

        *dest = item;
    }

    Ok(())
}

fn container(
    id: u8,
    kind: ContainerKind,
    data: u8,
    te: Option<&Compound>,
) -> Result<Block, BlockError> {
    let mut container = Container::empty(kind);

    if let Some(te) = te {
        read_items(te, &mut container.items)?;
    }

    Block::new(id, data, BlockKind::Container(container))
}

fn note(data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let pitch = match te {
        Some(te) => optional(te, "note", "byte", Value::as_byte)?.unwrap_or(0),
        None => 0,
    };

    Block::new(25, data, BlockKind::Note(Note { pitch }))
}

fn sign(id: u8, data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let mut sign = Sign {
        wall: id == 68,
        ..Default::default()
    };

    if let Some(te) = te {
        for (line, key) in sign
            .lines
            .iter_mut()
            .zip(["Text1", "Text2", "Text3", "Text4"])
        {
            *line = required(te, key, "string", Value::as_string)?.to_owned();
        }
    }

    Block::new(id, data, BlockKind::Sign(sign))
}

fn brewing_stand(data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let mut stand = BrewingStand::default();

    if let Some(te) = te {
        read_items(te, &mut stand.items)?;

        // Files exist with either tag type.
        stand.brew_time =
            optional(te, "BrewTime", "short or int", Value::as_short_or_int)?.unwrap_or(0);
    }

    Block::new(117, data, BlockKind::BrewingStand(stand))
}

fn command_block(data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let mut cmd = CommandBlock::default();

    if let Some(te) = te {
        cmd.command = required(te, "Command", "string", Value::as_string)?.to_owned();
        cmd.success_count = optional(te, "SuccessCount", "int", Value::as_int)?.unwrap_or(0);
    }

    Block::new(137, data, BlockKind::CommandBlock(cmd))
}

fn beacon(data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let mut beacon = Beacon::default();

    if let Some(te) = te {
        let int = |key| optional(te, key, "int", Value::as_int).map(Option::unwrap_or_default);

        beacon.levels = int("Levels")?;
        beacon.primary = int("Primary")?;
        beacon.secondary = int("Secondary")?;
    }

    Block::new(138, data, BlockKind::Beacon(beacon))
}

fn mob_head(data: u8, te: Option<&Compound>) -> Result<Block, BlockError> {
    let mut head = MobHead::default();

    if let Some(te) = te {
        if let Some(raw) = optional(te, "SkullType", "byte", Value::as_byte)? {
            head.skull_type = SkullType::from_raw(raw)?;
        }

        if let Some(rot) = optional(te, "Rot", "byte", Value::as_byte)? {
            head.rotation = rot as u8 & 0xf;
        }

        head.owner = optional(te, "ExtraType", "string", Value::as_string)?
            .filter(|owner| !owner.is_empty())
            .map(str::to_owned);
    }

    Block::new(144, data, BlockKind::MobHead(head))
}
