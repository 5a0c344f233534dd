use std::error::Error;

use clap::{Args, Parser, Subcommand};
use migration::MigratorTrait;
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, EntityTrait};
use uuid::Uuid;

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub token: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "gruzzolo_admin")]
#[command(about = "Admin utilities for Gruzzolo (bootstrap users and tokens)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./gruzzolo.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user and print its bearer token.
    Create(UserCreateArgs),
    /// Replace a user's bearer token, invalidating the old one.
    RotateToken(UserRotateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

#[derive(Args, Debug)]
struct UserRotateArgs {
    #[arg(long)]
    username: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if users::Entity::find_by_id(args.username.clone())
                .one(&db)
                .await?
                .is_some()
            {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }

            let token = Uuid::new_v4().to_string();
            let user = users::ActiveModel {
                username: Set(args.username.clone()),
                token: Set(token.clone()),
            };
            users::Entity::insert(user).exec(&db).await?;

            println!("created user: {}", args.username);
            println!("token: {token}");
        }
        Command::User(User {
            command: UserCommand::RotateToken(args),
        }) => {
            let Some(user) = users::Entity::find_by_id(args.username.clone())
                .one(&db)
                .await?
            else {
                eprintln!("user not found: {}", args.username);
                std::process::exit(1);
            };

            let token = Uuid::new_v4().to_string();
            let mut user: users::ActiveModel = user.into();
            user.token = Set(token.clone());
            users::Entity::update(user).exec(&db).await?;

            println!("rotated token for: {}", args.username);
            println!("token: {token}");
        }
    }

    Ok(())
}
