use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::schema::{DEFAULT_OUTPUT_FILE, DEFAULT_ROWS, DEFAULT_TABLE_NAME};
use crate::domain::{FieldType, ParameterName, ParameterPolicy, SchemaModel};

/// Describe a table schema and have the generation service produce CSV data for it
#[derive(Parser, Debug, Clone)]
#[command(name = "schemagen", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMAGEN_CONFIG", default_value = "schemagen.toml")]
    pub config: PathBuf,

    /// Generation service endpoint
    #[arg(long, env = "SCHEMAGEN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SCHEMAGEN_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Table name
    #[arg(short, long, default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// Number of rows to generate (1-10000)
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: u32,

    /// Output file name suggested to the service
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Field as name:type[:param[:param]], e.g. id:int:1:1000, title:string:24, who:name
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<FieldArg>,

    /// Where to write the CSV (defaults to the output file name)
    #[arg(short, long)]
    pub save_to: Option<PathBuf>,
}

impl Cli {
    /// Build the schema by replaying the arguments as form edits
    pub fn build_model(&self) -> SchemaModel {
        let mut model = SchemaModel::new();
        model.set_table_name(self.table.as_str());
        model.set_rows(self.rows);
        model.set_output_file(self.output_file.as_str());

        for arg in &self.fields {
            let index = model.add_field();
            model.set_field_name(index, arg.name.as_str());
            model.set_field_type(index, arg.field_type);
            for (name, value) in ParameterPolicy::parameters_for(arg.field_type)
                .iter()
                .zip(&arg.params)
            {
                model.set_field_parameter(index, *name, *value);
            }
        }

        model.take_events();
        model
    }
}

/// One `--field` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArg {
    pub name: String,
    pub field_type: FieldType,
    /// Positional values for the type's parameters, in policy order
    pub params: Vec<i32>,
}

impl FromStr for FieldArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default().to_string();
        let field_type: FieldType = parts
            .next()
            .ok_or_else(|| format!("missing type in '{}' (expected name:type)", s))?
            .parse()?;

        let params = parts
            .map(|p| {
                p.parse::<i32>()
                    .map_err(|_| format!("invalid parameter '{}' in '{}'", p, s))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let allowed: &[ParameterName] = ParameterPolicy::parameters_for(field_type);
        if params.len() > allowed.len() {
            return Err(format!(
                "type '{}' takes at most {} parameter(s), got {}",
                field_type,
                allowed.len(),
                params.len()
            ));
        }

        Ok(Self {
            name,
            field_type,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldParameters;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["schemagen"]);
        assert_eq!(cli.config, PathBuf::from("schemagen.toml"));
        assert!(cli.endpoint.is_none());
        assert!(cli.timeout.is_none());
        assert_eq!(cli.table, "users");
        assert_eq!(cli.rows, 10);
        assert_eq!(cli.output_file, "output.csv");
        assert!(cli.fields.is_empty());
        assert!(cli.save_to.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "schemagen",
            "--config",
            "custom.toml",
            "--endpoint",
            "http://gen:9000/generate",
            "--timeout",
            "5",
            "--table",
            "people",
            "--rows",
            "250",
            "--output-file",
            "people.csv",
            "-f",
            "id:int:1:1000",
            "--field",
            "who:name",
            "--save-to",
            "/tmp/people.csv",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.endpoint, Some("http://gen:9000/generate".to_string()));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.table, "people");
        assert_eq!(cli.rows, 250);
        assert_eq!(cli.fields.len(), 2);
        assert_eq!(cli.save_to, Some(PathBuf::from("/tmp/people.csv")));
    }

    #[test]
    fn test_field_arg_parsing() {
        assert_eq!(
            "id:int:1:1000".parse::<FieldArg>(),
            Ok(FieldArg {
                name: "id".to_string(),
                field_type: FieldType::Int,
                params: vec![1, 1000],
            })
        );
        assert_eq!(
            "title:string".parse::<FieldArg>().unwrap().params,
            Vec::<i32>::new()
        );
        assert!("id".parse::<FieldArg>().unwrap_err().contains("missing type"));
        assert!("id:uuid".parse::<FieldArg>().unwrap_err().contains("uuid"));
        assert!("id:int:one".parse::<FieldArg>().unwrap_err().contains("one"));
        assert!("who:name:3".parse::<FieldArg>().unwrap_err().contains("at most 0"));
        assert!("t:string:5:6".parse::<FieldArg>().is_err());
    }

    #[test]
    fn test_build_model() {
        let cli = Cli::parse_from([
            "schemagen",
            "--rows",
            "99999",
            "-f",
            "temp:double:-40",
            "-f",
            "title:string:5000",
            "-f",
            "who:name",
        ]);
        let mut model = cli.build_model();

        assert_eq!(model.rows(), 10_000);
        assert_eq!(model.len(), 3);
        assert_eq!(
            *model.field(0).unwrap().parameters(),
            FieldParameters::Range { min: -40, max: 100 }
        );
        assert_eq!(
            *model.field(1).unwrap().parameters(),
            FieldParameters::Length { length: 1000 }
        );
        assert_eq!(model.field(2).unwrap().field_type(), FieldType::Name);
        assert!(model.take_events().is_empty());
        assert!(model.validate().is_ok());
    }
}
