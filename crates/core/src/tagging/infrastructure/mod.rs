pub mod mecab_command_tagger;
pub mod mecab_output;
