pub mod app;

use clap::{Args, Parser, Subcommand};
use realnest::api::SearchFilters;
use realnest::models::Role;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "realnest", about = "Browse, list and moderate RealNest properties")]
pub struct Cli {
    /// API base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the session token and profile are kept
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and open the dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "REALNEST_PASSWORD")]
        password: String,
    },
    /// Create an account and open the dashboard
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    /// Show who is signed in
    Whoami,
    /// Open a client path such as `/`, `/dashboard` or `/properties/42`
    Open { path: String },
    /// Browse or search approved listings
    Browse {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one listing
    Show { id: i64 },
    /// List your own listings
    Mine {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Create a listing
    Create {
        #[command(flatten)]
        fields: PropertyArgs,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit one of your listings; unspecified fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: PropertyArgs,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete one of your listings
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    Admin(AdminCommand),
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub location: Option<String>,
    /// SALE or RENT
    #[arg(long = "type")]
    pub property_type: Option<String>,
    #[arg(long)]
    pub min_price: Option<String>,
    #[arg(long)]
    pub max_price: Option<String>,
    #[arg(long)]
    pub keywords: Option<String>,
}

impl From<FilterArgs> for SearchFilters {
    fn from(args: FilterArgs) -> Self {
        SearchFilters {
            location: args.location,
            property_type: args.property_type.map(|t| t.to_ascii_uppercase()),
            min_price: args.min_price,
            max_price: args.max_price,
            keywords: args.keywords,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PropertyArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// SALE or RENT
    #[arg(long = "type")]
    pub property_type: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub contact_email: Option<String>,
    #[arg(long)]
    pub contact_phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// Listings awaiting approval
    Pending {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    Approve {
        id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    Reject {
        id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Change a user's role (customer or admin)
    SetRole {
        id: i64,
        role: Role,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    DeleteUser {
        id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        yes: bool,
    },
}
