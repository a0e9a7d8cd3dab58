use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use gridcomp_specgen::Result;
use gridcomp_specgen::digest::digest;
use gridcomp_specgen::emit;
use gridcomp_specgen::model::{Category, RecordView, SpecRecord};
use gridcomp_specgen::reader;

#[derive(Parser)]
#[command(name = "gridcomp-specgen")]
#[command(about = "Generate import/export/internal state specs for a gridded component", long_about = None)]
struct Cli {
    /// Input spec filename.
    input: String,

    /// Override the component name derived from the input filename.
    #[arg(short, long)]
    name: Option<String>,

    /// Write registration code for IMPORT specs (optionally to FILE).
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "{component}_Import___.h"
    )]
    import_specs: Option<String>,

    /// Write registration code for EXPORT specs (optionally to FILE).
    #[arg(
        short = 'x',
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "{component}_Export___.h"
    )]
    export_specs: Option<String>,

    /// Write registration code for INTERNAL specs (optionally to FILE).
    #[arg(
        short = 'p',
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "{component}_Internal___.h"
    )]
    internal_specs: Option<String>,

    /// Write pointer retrieval code (optionally to FILE).
    #[arg(
        short = 'g',
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "{component}_GetPointer___.h"
    )]
    get_pointers: Option<String>,

    /// Write pointer declaration code (optionally to FILE).
    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "{component}_DeclarePointer___.h"
    )]
    declare_pointers: Option<String>,

    /// Cell delimiter used in the spec file.
    #[arg(long, default_value_t = '|')]
    delimiter: char,

    /// Dump the digested records as JSON, for inspection.
    #[arg(long, value_name = "FILE")]
    dump_digest: Option<String>,
}

/// Placed at the top of every generated include file.
const BANNER: &str = "
!                          -------------------
!                          W  A  R  N  I  N  G
!                          -------------------
!
!   This code fragment is automatically generated by gridcomp-specgen.
!   Please DO NOT edit it. Any modification made in here will be overwritten
!   next time this file is auto-generated. Instead, enter your additions
!   or deletions in the spec file in the src tree.
!
    ";

struct OutStream {
    path: String,
    text: String,
}

impl OutStream {
    fn open(template: &str, component: &str) -> Self {
        Self {
            path: template.replace("{component}", component),
            text: BANNER.to_string(),
        }
    }

    fn write(&self) -> Result<()> {
        std::fs::write(&self.path, &self.text)
            .with_context(|| format!("write {}", self.path))?;
        println!("Wrote {}", self.path);
        Ok(())
    }
}

#[derive(Serialize)]
struct DigestDump<'a> {
    schema_version: &'a str,
    component: &'a str,
    categories: Vec<CategoryDump>,
}

#[derive(Serialize)]
struct CategoryDump {
    category: &'static str,
    specs: Vec<RecordView>,
}

fn component_from_path(input: &str) -> String {
    let stem = Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.replace("_Registry", "").replace("_StateSpecs", "")
}

fn dump_digested(
    path: &str,
    parsed: &reader::ParsedSpecs,
    digested: &BTreeMap<Category, Vec<SpecRecord>>,
) -> Result<()> {
    let dump = DigestDump {
        schema_version: &parsed.schema_version,
        component: &parsed.component,
        categories: Category::ALL
            .iter()
            .filter_map(|category| {
                digested.get(category).map(|records| CategoryDump {
                    category: category.as_str(),
                    specs: records.iter().map(SpecRecord::view).collect(),
                })
            })
            .collect(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&dump)?)
        .with_context(|| format!("write {}", path))?;
    println!("Wrote {}", path);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Parse the blocked spec file.
    let parsed = reader::read_specs(&cli.input, cli.delimiter)?;

    // 2) Digest and validate every row; any failure aborts before output.
    let digested = digest(&parsed.blocks)?;

    let component = cli
        .name
        .clone()
        .unwrap_or_else(|| component_from_path(&cli.input));

    if let Some(path) = &cli.dump_digest {
        dump_digested(path, &parsed, &digested)?;
    }

    // 3) Open the requested streams.
    let mut spec_streams: BTreeMap<Category, OutStream> = BTreeMap::new();
    for (category, template) in [
        (Category::Import, &cli.import_specs),
        (Category::Export, &cli.export_specs),
        (Category::Internal, &cli.internal_specs),
    ] {
        if let Some(template) = template {
            spec_streams.insert(category, OutStream::open(template, &component));
        }
    }
    let mut declare_stream = cli
        .declare_pointers
        .as_ref()
        .map(|template| OutStream::open(template, &component));
    let mut get_stream = cli
        .get_pointers
        .as_ref()
        .map(|template| OutStream::open(template, &component));

    // 4) Emit fragments into the streams, in category then row order. The
    //    streams are buffered in memory so an emission failure leaves no
    //    partial file behind.
    for category in Category::ALL {
        let Some(records) = digested.get(&category) else {
            continue;
        };
        for record in records {
            if let Some(stream) = spec_streams.get_mut(&category) {
                stream.text.push_str(&emit::registration_fragment(record));
            }
            if let Some(stream) = declare_stream.as_mut() {
                stream.text.push_str(&emit::declare_pointers_fragment(record));
            }
            if let Some(stream) = get_stream.as_mut() {
                let fragment = emit::get_pointers_fragment(record).with_context(|| {
                    format!(
                        "pointer retrieval for {} spec {}",
                        record.category,
                        record.internal_name()
                    )
                })?;
                stream.text.push_str(&fragment);
            }
        }
    }

    // 5) Write everything out.
    for stream in spec_streams.values() {
        stream.write()?;
    }
    if let Some(stream) = &declare_stream {
        stream.write()?;
    }
    if let Some(stream) = &get_stream {
        stream.write()?;
    }

    Ok(())
}
