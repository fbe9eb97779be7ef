/// Media directory access.
pub mod media;
/// JSON file persistence of the tally store.
pub mod storage;
