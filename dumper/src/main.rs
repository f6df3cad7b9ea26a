#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use domkit::dom::print_dom_to;
use domkit::{Document, FragmentParser, HtmlDocument, ParserConfig, Whitespace};
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

enum DumpKind {
    Fragment { trim: bool },
    Document,
}

fn read_input(input: &str, stdin: &mut dyn Read) -> io::Result<String> {
    let mut contents = String::new();
    if input == "-" {
        stdin.read_to_string(&mut contents)?;
    } else {
        File::open(input)?.read_to_string(&mut contents)?;
    }
    Ok(contents)
}

fn dump(
    input: &str,
    kind: DumpKind,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> domkit::Result<()> {
    let markup = read_input(input, stdin)?;
    match kind {
        DumpKind::Fragment { trim } => {
            let config = ParserConfig {
                whitespace: if trim { Whitespace::Trim } else { Whitespace::Preserve },
                ..ParserConfig::default()
            };
            let mut parser = FragmentParser::new().with_config(config);
            let result = parser.parse(&markup)?;
            info!("Parsed {} as a {}", input, if result.is_fragment() { "fragment" } else { "node" });
            print_dom_to(result.node(), out);
        }
        DumpKind::Document => {
            let document = HtmlDocument::parse(&markup);
            print_dom_to(document.root(), out);
        }
    }
    Ok(())
}

fn main() {
    use clap::{AppSettings, SubCommand};

    env_logger::init();

    let args = app_from_crate!()
        .subcommand(
            SubCommand::with_name("fragment")
                .about("Dumps the nodes an HTML fragment turns into")
                .arg_from_usage("<input>  'The file containing the fragment, or - for stdin'")
                .arg_from_usage("--trim  'Trim surrounding whitespace before parsing'"),
        )
        .subcommand(
            SubCommand::with_name("document")
                .about("Dumps a DOM tree from an HTML document")
                .arg_from_usage("<input>  'The document to build the tree for, or - for stdin'"),
        )
        .setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();
    let (input, kind) = {
        if let Some(args) = args.subcommand_matches("fragment") {
            let input = args.value_of("input").unwrap_or("-");
            (input, DumpKind::Fragment { trim: args.is_present("trim") })
        } else if let Some(args) = args.subcommand_matches("document") {
            let input = args.value_of("input").unwrap_or("-");
            (input, DumpKind::Document)
        } else {
            panic!("Unknown subcommand, {:?}", args);
        }
    };

    if let Err(e) = dump(input, kind, &mut io::stdin(), &mut io::stdout()) {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{dump, DumpKind};
    use std::fs;
    use std::io::{self, Cursor};

    fn run(input: &str, kind: DumpKind, stdin: &str) -> String {
        let mut stdin = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        dump(input, kind, &mut stdin, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn dumps_fragments_from_stdin() {
        let printed = run("-", DumpKind::Fragment { trim: true }, "  <td>cell</td>\n");
        assert_eq!(
            printed,
            "\u{250c} DOM tree\n\u{2502}  \u{251C}\u{2500} <td>\n\u{2502}  \u{2502}  \u{251C}\u{2500} #text \"cell\"\n"
        );
    }

    #[test]
    fn untrimmed_fragments_keep_whitespace() {
        let printed = run("-", DumpKind::Fragment { trim: false }, " <b>x</b>");
        assert!(printed.contains("#document-fragment"));
        assert!(printed.contains("#text \" \""));
    }

    #[test]
    fn dumps_documents_from_files() {
        let path = std::env::temp_dir().join(format!("dumper-test-{}.html", std::process::id()));
        fs::write(&path, "<title>t</title><p>hello</p>").unwrap();
        let printed = run(path.to_str().unwrap(), DumpKind::Document, "");
        fs::remove_file(&path).unwrap();

        assert!(printed.contains("#document"));
        assert!(printed.contains("<head>"));
        assert!(printed.contains("#text \"hello\""));
    }

    #[test]
    fn missing_files_are_reported() {
        let mut stdin = io::empty();
        let mut out = Vec::new();
        let result = dump("/nonexistent/dumper/input.html", DumpKind::Document, &mut stdin, &mut out);
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
