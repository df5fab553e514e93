use crate::tagging::domain::tagged_token::TaggedToken;

/// Parses MeCab's default output format into tagged tokens.
///
/// Each token line is `surface<TAB>tag,feature,...`. Lines without a tab
/// (`EOS`, blanks, warnings) are skipped, as are lines whose first feature
/// is empty.
pub fn parse(output: &str) -> Vec<TaggedToken> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<TaggedToken> {
    let (surface, features) = line.split_once('\t')?;
    let tag = features.split(',').next()?.trim();
    if tag.is_empty() {
        return None;
    }
    Some(TaggedToken::new(surface, tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
오늘\tMAG,*,T,오늘,*,*,*,*
학교\tNNG,*,F,학교,*,*,*,*
에\tJKB,*,F,에,*,*,*,*
갔\tVV+EP,*,T,갔,Inflect,VV,EP,가/VV/*+았/EP/*
다\tEF,*,F,다,*,*,*,*
EOS
";

    #[test]
    fn test_parses_tokens_in_order() {
        let tokens = parse(SAMPLE);
        let surfaces: Vec<_> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["오늘", "학교", "에", "갔", "다"]);
    }

    #[test]
    fn test_tag_is_first_feature() {
        let tokens = parse(SAMPLE);
        assert_eq!(tokens[0].tag, "MAG");
        assert_eq!(tokens[3].tag, "VV+EP");
    }

    #[test]
    fn test_eos_and_blank_lines_skipped() {
        assert!(parse("EOS\n\n").is_empty());
    }

    #[test]
    fn test_line_without_tab_skipped() {
        let tokens = parse("broken line NNG\n사람\tNNG,*,T\n");
        assert_eq!(tokens, vec![TaggedToken::new("사람", "NNG")]);
    }

    #[test]
    fn test_empty_tag_dropped() {
        let tokens = parse("사람\t,*,T\n책\tNNG\n");
        assert_eq!(tokens, vec![TaggedToken::new("책", "NNG")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_windows_line_endings() {
        let tokens = parse("사람\tNNG,*,T\r\nEOS\r\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, "NNG");
    }
}
