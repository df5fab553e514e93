pub mod pos_category;
pub mod tagged_token;
pub mod tagger;
