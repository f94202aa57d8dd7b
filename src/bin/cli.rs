use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use feedesk::cli::{
    issue_token, parse_role_arg, render_capabilities, render_check, render_matrix,
    render_permissions,
};
use feedesk::config::JwtConfig;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "feedesk-cli")]
#[command(about = "Feedesk CLI - Inspect role permissions and capabilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a single resource/action pair for a role
    Check {
        /// Role label (super_admin, director, school_admin, or none)
        role: String,
        /// Resource name, e.g. payments
        resource: String,
        /// Action name, e.g. refund
        action: String,
    },
    /// List capability flags for a role
    Capabilities {
        /// Role label (super_admin, director, school_admin, or none)
        role: String,
    },
    /// List every permission a role is granted
    Permissions {
        /// Role label (super_admin, director, school_admin, or none)
        role: String,
    },
    /// Print the full role by permission matrix
    Matrix,
    /// Issue a signed session token using JWT_SECRET
    Token {
        /// Email address carried in the token
        #[arg(short = 'e', long)]
        email: String,

        /// User ID (random if omitted)
        #[arg(short = 'u', long)]
        user_id: Option<Uuid>,

        /// Role label embedded in the token
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            role,
            resource,
            action,
        } => parse_role_arg(&role).map(|role| render_check(role, &resource, &action)),
        Commands::Capabilities { role } => parse_role_arg(&role).map(render_capabilities),
        Commands::Permissions { role } => parse_role_arg(&role).map(render_permissions),
        Commands::Matrix => Ok(render_matrix()),
        Commands::Token {
            email,
            user_id,
            role,
        } => issue_token(
            user_id.unwrap_or_else(Uuid::new_v4),
            &email,
            role.as_deref(),
            &JwtConfig::from_env(),
        )
        .map_err(|e| e.to_string()),
    };

    match result {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
