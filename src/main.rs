use anyhow::{Context, Result};
use i18n_validate::{
    FieldDescriptor, FieldValue, Record, TypeDescriptor, ValidateError, ValidatorConfig,
};
use serde::Deserialize;
use std::io::Read;
use std::sync::OnceLock;
use tracing::info;

/// Sign-up form read from stdin
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SignupForm {
    first_name: String,
    email: String,
    age: Option<i64>,
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Address {
    street: String,
    city: String,
    postal_code: String,
}

impl Record for SignupForm {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::of::<SignupForm>(
                "SignupForm",
                vec![
                    FieldDescriptor::new("FirstName")
                        .rules("required,max=50")
                        .translations("en:First Name;pt:Primeiro Nome;es:Nombre"),
                    FieldDescriptor::new("Email")
                        .rules("required,email")
                        .translations("en:Email;pt:E-mail;es:Correo electrónico"),
                    FieldDescriptor::new("Age")
                        .rules("omitempty,min=18,max=130")
                        .translations("en:Age;pt:Idade;es:Edad"),
                    FieldDescriptor::new("Address")
                        .translations("en:Address;pt:Endereço;es:Dirección")
                        .nested::<Address>(),
                ],
            )
        })
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "FirstName" => FieldValue::from(&self.first_name),
            "Email" => FieldValue::from(&self.email),
            "Age" => FieldValue::from(self.age),
            "Address" => FieldValue::optional_record(self.address.as_ref()),
            _ => FieldValue::Absent,
        }
    }
}

impl Record for Address {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::of::<Address>(
                "Address",
                vec![
                    FieldDescriptor::new("Street")
                        .rules("required")
                        .translations("en:Street;pt:Rua;es:Calle"),
                    FieldDescriptor::new("City")
                        .rules("required")
                        .translations("en:City;pt:Cidade;es:Ciudad"),
                    FieldDescriptor::new("PostalCode")
                        .rules("omitempty,min=4,max=10")
                        .translations("en:Postal Code;pt:Código Postal;es:Código Postal"),
                ],
            )
        })
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "Street" => FieldValue::from(&self.street),
            "City" => FieldValue::from(&self.city),
            "PostalCode" => FieldValue::from(&self.postal_code),
            _ => FieldValue::Absent,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_validate=info".parse()?),
        )
        .init();

    let config = ValidatorConfig::from_env()?;
    let validator = config.build()?;

    // Requested locale is the first argument, if any
    let locale = std::env::args().nth(1);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read form from stdin")?;
    let form: SignupForm =
        serde_json::from_str(&input).context("Failed to parse form JSON")?;

    info!(
        "Validating sign-up form (locale: {})",
        locale.as_deref().unwrap_or(validator.default_locale())
    );

    match validator.validate(Some(&form), locale.as_deref()) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(ValidateError::Invalid(outcome)) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
