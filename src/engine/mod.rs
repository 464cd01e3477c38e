pub mod legality;
pub mod lexicon;
pub mod morph;
pub mod operative;
pub mod report;
pub mod round;
pub mod search;
