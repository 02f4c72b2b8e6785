// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Result kinds shared by every sprite entry point.
//!
//! The command layer turns a failure into an interpreter message and
//! aborts the current statement, so each variant prints in the usual
//! BASIC `?... ERROR` form and also maps to a stable numeric result code.

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteError {
    // target state
    NotASprite,
    InvalidSprite(usize),
    SpriteInactive,
    InvalidWriteSurface,
    InvalidReadSurface,

    // global state
    SpritesAreHidden,
    SpritesNotHidden,

    // resources
    StackFull,
    StackEmpty,
    IndexOutOfBounds(usize),
    ElementNotFound,
    OutOfMemory,

    // arguments
    IllegalQuantity(String),

    // invariants
    InternalFault(String),
}

impl SpriteError {
    /// Legacy result code handed back to the interpreter. 0 is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            SpriteError::NotASprite => 1,
            SpriteError::InvalidSprite(_) => 2,
            SpriteError::SpriteInactive => 3,
            SpriteError::InvalidWriteSurface => 4,
            SpriteError::InvalidReadSurface => 5,
            SpriteError::SpritesAreHidden => 6,
            SpriteError::SpritesNotHidden => 7,
            SpriteError::StackFull => 8,
            SpriteError::StackEmpty => 9,
            SpriteError::IndexOutOfBounds(_) => 10,
            SpriteError::ElementNotFound => 11,
            SpriteError::OutOfMemory => 12,
            SpriteError::IllegalQuantity(_) => 13,
            SpriteError::InternalFault(_) => 14,
        }
    }
}

impl std::fmt::Display for SpriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteError::NotASprite => write!(f, "?NOT A SPRITE ERROR"),
            SpriteError::InvalidSprite(id) => write!(f, "?INVALID SPRITE: {}", id),
            SpriteError::SpriteInactive => write!(f, "?SPRITE INACTIVE ERROR"),
            SpriteError::InvalidWriteSurface => write!(f, "?INVALID WRITE SURFACE ERROR"),
            SpriteError::InvalidReadSurface => write!(f, "?INVALID READ SURFACE ERROR"),
            SpriteError::SpritesAreHidden => write!(f, "?SPRITES ARE HIDDEN ERROR"),
            SpriteError::SpritesNotHidden => write!(f, "?SPRITES NOT HIDDEN ERROR"),
            SpriteError::StackFull => write!(f, "?STACK FULL ERROR"),
            SpriteError::StackEmpty => write!(f, "?STACK EMPTY ERROR"),
            SpriteError::IndexOutOfBounds(idx) => write!(f, "?INDEX OUT OF BOUNDS: {}", idx),
            SpriteError::ElementNotFound => write!(f, "?ELEMENT NOT FOUND ERROR"),
            SpriteError::OutOfMemory => write!(f, "?OUT OF MEMORY ERROR"),
            SpriteError::IllegalQuantity(msg) => write!(f, "?ILLEGAL QUANTITY: {}", msg),
            SpriteError::InternalFault(msg) => write!(f, "?INTERNAL FAULT: {}", msg),
        }
    }
}

impl std::error::Error for SpriteError {}

pub type Result<T> = std::result::Result<T, SpriteError>;

/// Collapse an entry point's outcome into the integer the interpreter expects.
pub fn result_code<T>(r: &Result<T>) -> i32 {
    match r {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SpriteError::SpritesAreHidden.to_string(),
            "?SPRITES ARE HIDDEN ERROR"
        );
        assert_eq!(SpriteError::InvalidSprite(300).to_string(), "?INVALID SPRITE: 300");
        assert!(SpriteError::InternalFault("bitset window".to_string())
            .to_string()
            .contains("bitset window"));
    }

    #[test]
    fn test_result_code() {
        let ok: Result<()> = Ok(());
        assert_eq!(result_code(&ok), 0);

        let err: Result<()> = Err(SpriteError::StackFull);
        assert_eq!(result_code(&err), SpriteError::StackFull.code());
        assert_ne!(result_code(&err), 0);
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            SpriteError::NotASprite,
            SpriteError::InvalidSprite(0),
            SpriteError::SpriteInactive,
            SpriteError::InvalidWriteSurface,
            SpriteError::InvalidReadSurface,
            SpriteError::SpritesAreHidden,
            SpriteError::SpritesNotHidden,
            SpriteError::StackFull,
            SpriteError::StackEmpty,
            SpriteError::IndexOutOfBounds(0),
            SpriteError::ElementNotFound,
            SpriteError::OutOfMemory,
            SpriteError::IllegalQuantity(String::new()),
            SpriteError::InternalFault(String::new()),
        ];
        let mut codes: Vec<i32> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(!codes.contains(&0));
    }
}
