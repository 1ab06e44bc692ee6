use clap::Subcommand;
use gs_client::GroundStationClient;
use gs_core::{ProfileUpdate, UserProfile};

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the operator profile
    Show,
    /// Change one or more profile fields
    Update {
        #[arg(long)]
        call_sign: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long = "phone")]
        phone_number: Option<String>,
    },
}

pub(crate) async fn run(
    client: &GroundStationClient,
    command: ProfileCommands,
) -> anyhow::Result<()> {
    match command {
        ProfileCommands::Show => {
            let profile = client.get_profile().await?;
            print_profile(&profile);
        }
        ProfileCommands::Update {
            call_sign,
            first_name,
            last_name,
            email,
            phone_number,
        } => {
            let update = ProfileUpdate {
                call_sign,
                first_name,
                last_name,
                email,
                phone_number,
            };
            if update.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field, e.g. --call-sign");
            }

            // PUT replaces the whole record, so merge over the stored one.
            let current = client.get_profile().await?;
            let stored = client.update_profile(&update.apply(current)).await?;
            tracing::info!(call_sign = %stored.call_sign, "profile updated");
            print_profile(&stored);
        }
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let dash = "\u{2014}";
    println!("{:<12}{}", "Call sign", profile.call_sign);
    println!("{:<12}{}", "First name", profile.first_name);
    println!(
        "{:<12}{}",
        "Last name",
        profile.last_name.as_deref().unwrap_or(dash)
    );
    println!("{:<12}{}", "Email", profile.email.as_deref().unwrap_or(dash));
    println!(
        "{:<12}{}",
        "Phone",
        profile.phone_number.as_deref().unwrap_or(dash)
    );
}
