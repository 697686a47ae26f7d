//! Typed views of field-carrying reply frames
//!
//! The five wire fields mean different things per command; these types give
//! each meaning its own name.

/// Per-cycle header sent before the data records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Metadata {
    /// Number of Block/Arrow frames that follow
    pub protocol_size: u16,
    /// Number of distinct learned IDs on the sensor
    pub knowledge_size: u16,
    /// Sensor frame counter
    pub frame_number: u16,
}

impl Metadata {
    /// Build from the five wire fields
    pub fn from_fields(fields: [i16; 5]) -> Self {
        Self {
            protocol_size: fields[0] as u16,
            knowledge_size: fields[1] as u16,
            frame_number: fields[2] as u16,
        }
    }

    /// Wire fields for this record
    pub fn to_fields(&self) -> [i16; 5] {
        [
            self.protocol_size as i16,
            self.knowledge_size as i16,
            self.frame_number as i16,
            0,
            0,
        ]
    }
}

/// A rectangular detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Block {
    pub x_center: i16,
    pub y_center: i16,
    pub width: i16,
    pub height: i16,
    /// Learned ID, 0 if unlearned
    pub id: u16,
}

impl Block {
    /// Build from the five wire fields
    pub fn from_fields(fields: [i16; 5]) -> Self {
        Self {
            x_center: fields[0],
            y_center: fields[1],
            width: fields[2],
            height: fields[3],
            id: fields[4] as u16,
        }
    }

    /// Wire fields for this record
    pub fn to_fields(&self) -> [i16; 5] {
        [
            self.x_center,
            self.y_center,
            self.width,
            self.height,
            self.id as i16,
        ]
    }
}

/// A directed line detection (line tracking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arrow {
    pub x_origin: i16,
    pub y_origin: i16,
    pub x_target: i16,
    pub y_target: i16,
    /// Learned ID, 0 if unlearned
    pub id: u16,
}

impl Arrow {
    /// Build from the five wire fields
    pub fn from_fields(fields: [i16; 5]) -> Self {
        Self {
            x_origin: fields[0],
            y_origin: fields[1],
            x_target: fields[2],
            y_target: fields[3],
            id: fields[4] as u16,
        }
    }

    /// Wire fields for this record
    pub fn to_fields(&self) -> [i16; 5] {
        [
            self.x_origin,
            self.y_origin,
            self.x_target,
            self.y_target,
            self.id as i16,
        ]
    }
}

/// Kind of a data record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordKind {
    Block,
    Arrow,
}

/// One entry of a result set
///
/// `Invalid` is what indexed lookups hand back when nothing matches; check
/// the matching count first or use [`Record::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Record {
    Block(Block),
    Arrow(Arrow),
    #[default]
    Invalid,
}

impl Record {
    /// Learned ID (0 for unlearned detections and for `Invalid`)
    pub fn id(&self) -> u16 {
        match self {
            Record::Block(block) => block.id,
            Record::Arrow(arrow) => arrow.id,
            Record::Invalid => 0,
        }
    }

    /// Kind of the record, `None` for `Invalid`
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Record::Block(_) => Some(RecordKind::Block),
            Record::Arrow(_) => Some(RecordKind::Arrow),
            Record::Invalid => None,
        }
    }

    /// Returns true unless this is the `Invalid` sentinel
    pub fn is_valid(&self) -> bool {
        !matches!(self, Record::Invalid)
    }

    /// Returns true for a block
    pub fn is_block(&self) -> bool {
        matches!(self, Record::Block(_))
    }

    /// Returns true for an arrow
    pub fn is_arrow(&self) -> bool {
        matches!(self, Record::Arrow(_))
    }

    /// Returns true if the ID refers to a learned object
    pub fn is_learned(&self) -> bool {
        self.is_valid() && self.id() >= 1
    }

    /// The block, if this is one
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Record::Block(block) => Some(block),
            _ => None,
        }
    }

    /// The arrow, if this is one
    pub fn as_arrow(&self) -> Option<&Arrow> {
        match self {
            Record::Arrow(arrow) => Some(arrow),
            _ => None,
        }
    }
}

impl From<Block> for Record {
    fn from(block: Block) -> Self {
        Record::Block(block)
    }
}

impl From<Arrow> for Record {
    fn from(arrow: Arrow) -> Self {
        Record::Arrow(arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_field_order() {
        let block = Block::from_fields([160, 120, 40, 30, 2]);
        assert_eq!(block.x_center, 160);
        assert_eq!(block.height, 30);
        assert_eq!(block.id, 2);
        assert_eq!(block.to_fields(), [160, 120, 40, 30, 2]);
    }

    #[test]
    fn test_metadata_fields() {
        let info = Metadata::from_fields([3, 2, 511, 0, 0]);
        assert_eq!(info.protocol_size, 3);
        assert_eq!(info.knowledge_size, 2);
        assert_eq!(info.frame_number, 511);
    }

    #[test]
    fn test_record_learned() {
        let anonymous = Record::from(Block::default());
        let learned = Record::from(Arrow {
            id: 4,
            ..Arrow::default()
        });

        assert!(!anonymous.is_learned());
        assert!(learned.is_learned());
        assert_eq!(learned.kind(), Some(RecordKind::Arrow));
        assert!(!Record::Invalid.is_learned());
        assert_eq!(Record::default(), Record::Invalid);
    }
}
