pub mod hash_encoder; // seed-salted hashing baseline
pub mod ngram; // character n-gram extraction
pub mod report; // topic-by-topic reading of a fitted encoder
pub mod traits; // the encoder capability
