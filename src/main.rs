use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elf::endian::AnyEndian;

use crate::printer::Printer;
use crate::sections::{resolve, resolve_compat, SectionNode};

mod printer;
mod sections;
mod strings;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the section tree of a module
    Tree { filename: String },

    /// Dump the NUL-terminated strings of a section
    Strings {
        filename: String,

        /// Dotted section path, e.g. "rodata" or "text.unlikely"
        path: String,

        /// Maximum number of records (0 = unbounded)
        #[arg(short = 'n', long, default_value = "0")]
        max_count: usize,

        /// Legacy matching: substring path components, overshooting count bound
        #[arg(long)]
        compat: bool,

        /// Demangle symbols
        #[arg(short, long)]
        demangle: bool,
    },

    /// Resolve a dotted section path and print the match
    Resolve {
        filename: String,

        path: String,

        /// Legacy matching: substring path components
        #[arg(long)]
        compat: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut printer = Printer::stdout(args.no_color);

    match &args.command {
        Command::Tree { filename } => {
            let root = load(filename)?;
            printer.print_tree(&root);
        }
        Command::Strings {
            filename,
            path,
            max_count,
            compat,
            demangle,
        } => {
            let root = load(filename)?;
            let section = lookup(&root, path, *compat)?;
            let records = if *compat {
                strings::scan_compat(&section.data, *max_count)
            } else {
                strings::scan(&section.data, *max_count)
            };
            printer.print_records(&records, *demangle);
        }
        Command::Resolve {
            filename,
            path,
            compat,
        } => {
            let root = load(filename)?;
            let section = lookup(&root, path, *compat)?;
            printer.print_section(section);
        }
    }
    Ok(())
}

fn lookup<'a>(root: &'a SectionNode, path: &str, compat: bool) -> Result<&'a SectionNode> {
    let found = if compat {
        resolve_compat(root, path)
    } else {
        resolve(root, path)
    };
    found.with_context(|| format!("section not found: {}", path))
}

fn load(filename: &str) -> Result<SectionNode> {
    let content =
        std::fs::read(filename).with_context(|| format!("cannot read {}", filename))?;
    let elf = elf::ElfBytes::<AnyEndian>::minimal_parse(&content)
        .with_context(|| format!("{} is not an ELF file", filename))?;

    let (sections, strtab) = elf
        .section_headers_with_strtab()
        .context("cannot parse section headers")?;
    let sections = sections.context("no section headers")?;
    let strtab = strtab.context("no section name table")?;

    let mut root = SectionNode::default();
    for s in sections.iter() {
        let name = strtab
            .get(s.sh_name as usize)
            .context("bad section name offset")?;
        let components: Vec<&str> = name.split('.').filter(|c| !c.is_empty()).collect();
        if components.is_empty() {
            continue;
        }
        let data = if s.sh_type == elf::abi::SHT_NOBITS {
            Vec::new()
        } else {
            elf.section_data(&s)
                .with_context(|| format!("cannot read section {}", name))?
                .0
                .to_vec()
        };
        root.insert(&components, s.sh_addr, s.sh_size, data);
    }
    Ok(root)
}
