use clap::{Arg, Command};
use mongodb::bson::Document;

use crate::{db::RentalStore, models::Rental};

pub fn cli() -> Command {
    Command::new("rental-store")
        .about("Inspect and edit the rentals collection")
        .subcommand(Command::new("list").about("List every rental"))
        .subcommand(
            Command::new("get")
                .about("Fetch one rental by id")
                .arg(Arg::new("id").required(true).value_name("ID")),
        )
        .subcommand(
            Command::new("add").about("Insert a new rental").arg(
                Arg::new("json")
                    .long("json")
                    .required(true)
                    .value_name("DOC")
                    .help("Rental fields as a JSON object"),
            ),
        )
        .subcommand(
            Command::new("update").about("Update fields on an existing rental").arg(
                Arg::new("json")
                    .long("json")
                    .required(true)
                    .value_name("DOC")
                    .help("JSON object containing `id` plus the fields to set"),
            ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one rental by id")
                .arg(Arg::new("id").required(true).value_name("ID")),
        )
}

pub async fn handle_cli(store: &RentalStore) -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let Some((name, sub_matches)) = matches.subcommand() else {
        cli().print_help()?;
        return Ok(());
    };

    store.connect().await?;

    match name {
        "list" => {
            let rentals = store.get_rentals().await?;
            println!("{}", serde_json::to_string_pretty(&rentals)?);
        }
        "get" => {
            let id = sub_matches.get_one::<String>("id").expect("required");

            match store.get_rental_by_id(id).await? {
                Some(rental) => println!("{}", serde_json::to_string_pretty(&rental)?),
                None => {
                    eprintln!("No rental found with the id {}", id);
                    std::process::exit(1);
                }
            }
        }
        "add" => {
            let json = sub_matches.get_one::<String>("json").expect("required");
            let rental: Document = serde_json::from_str(json)?;

            let result = store.add_rental(rental).await?;
            let id = result
                .inserted_id
                .as_object_id()
                .map(|oid| oid.to_hex())
                .unwrap_or_else(|| result.inserted_id.to_string());
            println!("Inserted rental with id {}", id);
        }
        "update" => {
            let json = sub_matches.get_one::<String>("json").expect("required");
            let rental: Rental = serde_json::from_str(json)?;

            let result = store.update_rental(&rental).await?;
            if result.matched_count == 0 {
                eprintln!("No rental found with the id {}", rental.id);
                std::process::exit(1);
            }
            println!(
                "Updated rental {} (matched {}, modified {})",
                rental.id, result.matched_count, result.modified_count
            );
        }
        "delete" => {
            let id = sub_matches.get_one::<String>("id").expect("required");

            match store.delete_rental_by_id(id).await? {
                Some(result) if result.deleted_count > 0 => {
                    println!("Deleted rental {}", id);
                }
                _ => {
                    eprintln!("No rental found with the id {}", id);
                    std::process::exit(1);
                }
            }
        }
        _ => cli().print_help()?,
    }

    Ok(())
}
