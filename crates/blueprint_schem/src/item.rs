//! Inventory slots of containers and brewing stands.

use blueprint_nbt::{Compound, Value};

use crate::field::required;
use crate::BlockError;

/// Leather helmet, tunic, pants and boots. The only items that store a dye
/// color in this era of the format.
const COLORABLE_IDS: std::ops::RangeInclusive<i16> = 298..=301;

/// The contents of one inventory slot.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Item {
    pub id: i16,
    /// Damage for tools and armor, the variant for everything else.
    pub damage: i16,
    pub count: i8,
    /// A custom display name set with an anvil.
    pub name: Option<String>,
    pub kind: ItemKind,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ItemKind {
    #[default]
    Plain,
    /// Dyeable leather armor. `color` is a 24-bit RGB value.
    Colorable { color: Option<u32> },
}

impl Item {
    /// The empty slot.
    pub const EMPTY: Self = Self {
        id: 0,
        damage: 0,
        count: 0,
        name: None,
        kind: ItemKind::Plain,
    };

    /// Builds an item, picking the colorable kind for leather armor.
    pub fn resolve(id: i16, damage: i16, count: i8) -> Self {
        let kind = if COLORABLE_IDS.contains(&id) {
            ItemKind::Colorable { color: None }
        } else {
            ItemKind::Plain
        };

        Self {
            id,
            damage,
            count,
            name: None,
            kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0 || self.count == 0
    }

    pub fn is_colorable(&self) -> bool {
        matches!(self.kind, ItemKind::Colorable { .. })
    }

    pub fn color(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Colorable { color } => color,
            ItemKind::Plain => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Sets the dye color. Returns `false` and leaves the item unchanged if it
    /// cannot be colored.
    pub fn set_color(&mut self, rgb: u32) -> bool {
        match &mut self.kind {
            ItemKind::Colorable { color } => {
                *color = Some(rgb & 0xff_ffff);
                true
            }
            ItemKind::Plain => false,
        }
    }

    /// Reads one entry of an `Items` list, returning its slot index.
    pub(crate) fn from_record(record: &Compound) -> Result<(i8, Self), BlockError> {
        let id = required(record, "id", "short", Value::as_short)?;
        let damage = required(record, "Damage", "short", Value::as_short)?;
        let count = required(record, "Count", "byte", Value::as_byte)?;
        let slot = required(record, "Slot", "byte", Value::as_byte)?;

        let mut item = Self::resolve(id, damage, count);
        item.apply_display(record);

        Ok((slot, item))
    }

    /// Applies `tag.display.Name` and `tag.display.color`. Files written by
    /// older versions have neither, so anything missing or mistyped is
    /// skipped.
    fn apply_display(&mut self, record: &Compound) {
        let Some(display) = record
            .get("tag")
            .and_then(Value::as_compound)
            .and_then(|tag| tag.get("display"))
            .and_then(Value::as_compound)
        else {
            return;
        };

        if let Some(name) = display.get("Name").and_then(Value::as_string) {
            self.set_name(name);
        }

        if self.is_colorable() {
            if let Some(color) = display.get("color").and_then(Value::as_int) {
                self.set_color(color as u32);
            }
        }
    }
}
