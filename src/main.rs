//! Command-line interface for xstypes

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
use xstypes::{
    BuiltinSchema, GenericComplexType, GenericSchema, KeyPolicy, QName, Schema, TypeConverter,
    TypeRef, Value,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xstypes")]
#[command(author, version, about = "Import and export records through XML Schema types", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Selects the type a command runs
#[cfg(feature = "cli")]
#[derive(clap::Args, Debug)]
struct TypeArgs {
    /// Type name, plain or in Clark notation ({namespace}name)
    #[arg(short = 't', long = "type", default_value = "anyType")]
    type_name: String,

    /// Build an anonymous complex type instead, from KEY=TYPE members
    #[arg(short, long = "member", value_name = "KEY=TYPE")]
    members: Vec<String>,

    /// Visit every declared member, not only the keys present
    #[arg(long)]
    declared: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in types
    Types {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Import a JSON record item into a type's value space
    Import {
        #[command(flatten)]
        ty: TypeArgs,

        /// JSON input
        #[arg(value_name = "JSON")]
        input: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Export a JSON value from a type's value space
    Export {
        #[command(flatten)]
        ty: TypeArgs,

        /// JSON value
        #[arg(value_name = "JSON")]
        input: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Import input that is valid in one type into another
    Convert {
        /// Source type, plain or in Clark notation
        #[arg(long)]
        from: String,

        /// Target type, plain or in Clark notation
        #[arg(long)]
        to: String,

        /// JSON input
        #[arg(value_name = "JSON")]
        input: String,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Types { json } => cmd_types(json),
        Commands::Import { ty, input, pretty } => cmd_import(ty, input, pretty),
        Commands::Export { ty, input, pretty } => cmd_export(ty, input, pretty),
        Commands::Convert { from, to, input } => cmd_convert(from, to, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(e.as_ref());
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_types(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let schema = BuiltinSchema::instance();

    if json_output {
        let types: Vec<serde_json::Value> = schema
            .names()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "namespace": xstypes::XSD_NAMESPACE,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&types)?);
    } else {
        println!("xstypes {}", xstypes::VERSION);
        println!("\n=== Built-in Types ===");
        for name in schema.names() {
            println!("  {}", QName::xsd(name));
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn resolve(schema: &GenericSchema, text: &str) -> xstypes::Result<TypeRef> {
    let qname = QName::parse_clark(text)?;
    schema.get_type(&qname.local_name, qname.namespace.as_deref())
}

#[cfg(feature = "cli")]
fn build_type(args: &TypeArgs) -> Result<TypeRef, Box<dyn std::error::Error>> {
    let schema = GenericSchema::new();

    if args.members.is_empty() {
        return Ok(resolve(&schema, &args.type_name)?);
    }

    let policy = if args.declared {
        KeyPolicy::Declared
    } else {
        KeyPolicy::Present
    };
    let mut complex = GenericComplexType::new().with_key_policy(policy);
    for member in &args.members {
        let (key, type_name) = member
            .split_once('=')
            .ok_or_else(|| format!("member '{}' is not of the form KEY=TYPE", member))?;
        complex.set_member_type(key, resolve(&schema, type_name)?)?;
    }
    Ok(Arc::new(complex))
}

#[cfg(feature = "cli")]
fn parse_input(input: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(Value::from(json))
}

#[cfg(feature = "cli")]
fn print_value(value: &Value, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_import(args: TypeArgs, input: String, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ty = build_type(&args)?;
    let value = ty.import(&parse_input(&input)?)?;
    print_value(&value, pretty)
}

#[cfg(feature = "cli")]
fn cmd_export(args: TypeArgs, input: String, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ty = build_type(&args)?;
    let output = ty.export(&parse_input(&input)?)?;
    print_value(&output, pretty)
}

#[cfg(feature = "cli")]
fn cmd_convert(from: String, to: String, input: String) -> Result<(), Box<dyn std::error::Error>> {
    let schema = GenericSchema::new();
    let source = resolve(&schema, &from)?;
    let target = resolve(&schema, &to)?;
    let value = target.import_from(&*source, &parse_input(&input)?)?;
    print_value(&value, false)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
