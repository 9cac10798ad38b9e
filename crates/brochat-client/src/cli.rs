//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use brochat_core::RoomMembershipModel;

use crate::config::ClientConfig;
use crate::query::{MessagesQuery, UsersQuery};

/// brochat - talk to a BroChat server from the terminal
#[derive(Debug, Parser)]
#[command(name = "brochat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "BROCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Server base address (overrides config)
    #[arg(long, global = true, env = "BROCHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Access token or secret reference (overrides config)
    #[arg(long, global = true, env = "BROCHAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Authorization token type (overrides config)
    #[arg(long, global = true)]
    pub token_type: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the configuration file in effect: `--config`, else the default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(ClientConfig::default_path)
    }

    /// Returns true if `--debug` is given or the config file enables debug.
    pub fn debug_enabled(&self, config: &ClientConfig) -> bool {
        self.debug || config.debug
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the calling user's profile
    User,

    /// List users
    Users {
        /// Leave yourself out of the listing
        #[arg(long)]
        exclude_self: bool,

        /// Leave your friends out of the listing
        #[arg(long)]
        exclude_friends: bool,

        /// Only users whose name matches
        #[arg(long)]
        filter: Option<String>,

        #[arg(long)]
        page: Option<u64>,

        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Show a channel
    Channel {
        /// Channel ID
        id: String,
    },

    /// List a channel's messages
    Messages {
        /// Channel ID
        id: String,

        /// Only messages sent before this message ID
        #[arg(long)]
        before: Option<String>,

        #[arg(long)]
        page: Option<u64>,

        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Friend requests
    Friend {
        #[command(subcommand)]
        action: FriendAction,
    },

    /// Rooms
    Rooms {
        #[command(subcommand)]
        action: RoomAction,
    },

    /// Classify a chat line as plain text or a macro
    Classify {
        /// The chat line
        text: String,

        /// Channel ID to build a macro request for
        #[arg(long)]
        channel: Option<String>,
    },

    /// Feed envelope tools
    Feed {
        #[command(subcommand)]
        action: FeedAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Friend request actions.
#[derive(Debug, Subcommand)]
pub enum FriendAction {
    /// Send a friend request
    Send {
        /// The user to befriend
        user_id: String,
    },

    /// Accept a friend request
    Accept {
        /// The user that sent the request
        user_id: String,
    },
}

/// Room actions.
#[derive(Debug, Subcommand)]
pub enum RoomAction {
    /// List rooms
    List,

    /// Create a room
    Create {
        /// Room name
        name: String,

        /// Who may join: friends or public
        #[arg(long, default_value = "friends")]
        membership: RoomMembershipModel,
    },

    /// Join a room
    Join {
        /// Room ID
        id: String,
    },
}

/// Feed actions.
#[derive(Debug, Subcommand)]
pub enum FeedAction {
    /// Decode an envelope read from stdin
    Decode,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}

/// Builds a users query from CLI flags. Unset flags are left out.
pub fn users_query(
    exclude_self: bool,
    exclude_friends: bool,
    filter: Option<String>,
    page: Option<u64>,
    page_size: Option<u64>,
) -> UsersQuery {
    UsersQuery {
        exclude_self: exclude_self.then_some(true),
        exclude_friends: exclude_friends.then_some(true),
        username_filter: filter,
        page,
        page_size,
    }
}

/// Builds a messages query from CLI flags.
pub fn messages_query(
    before: Option<String>,
    page: Option<u64>,
    page_size: Option<u64>,
) -> MessagesQuery {
    MessagesQuery {
        before_message: before,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_users_flags() {
        let cli = Cli::try_parse_from([
            "brochat",
            "users",
            "--exclude-self",
            "--filter",
            "ali",
            "--page-size",
            "500",
        ])
        .unwrap();
        match cli.command {
            Command::Users {
                exclude_self,
                exclude_friends,
                filter,
                page,
                page_size,
            } => {
                let query = users_query(exclude_self, exclude_friends, filter, page, page_size);
                assert_eq!(query.exclude_self, Some(true));
                assert_eq!(query.exclude_friends, None);
                assert_eq!(query.username_filter.as_deref(), Some("ali"));
                assert_eq!(query.page_size, Some(500));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_room_create_with_membership() {
        let cli = Cli::try_parse_from([
            "brochat",
            "--base-url",
            "https://chat.example.com",
            "rooms",
            "create",
            "general",
            "--membership",
            "public",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://chat.example.com"));
        match cli.command {
            Command::Rooms {
                action: RoomAction::Create { name, membership },
            } => {
                assert_eq!(name, "general");
                assert_eq!(membership, RoomMembershipModel::Public);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_membership() {
        assert!(
            Cli::try_parse_from(["brochat", "rooms", "create", "x", "--membership", "secret"])
                .is_err()
        );
    }

    #[test]
    fn config_path_prefers_flag() {
        let cli = Cli::try_parse_from(["brochat", "--config", "/tmp/other.toml", "config", "dump"])
            .unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/other.toml"));

        let cli = Cli::try_parse_from(["brochat", "config", "path"]).unwrap();
        if cli.config.is_none() {
            assert_eq!(cli.config_path(), ClientConfig::default_path());
        }
    }

    #[test]
    fn debug_from_flag_or_config() {
        let cli = Cli::try_parse_from(["brochat", "user"]).unwrap();
        let mut config = ClientConfig::default();
        assert!(!cli.debug_enabled(&config));

        config.debug = true;
        assert!(cli.debug_enabled(&config));

        let cli = Cli::try_parse_from(["brochat", "--debug", "user"]).unwrap();
        assert!(cli.debug_enabled(&ClientConfig::default()));
    }

    #[test]
    fn messages_query_from_flags() {
        let query = messages_query(Some("m1".to_string()), None, Some(20));
        assert_eq!(query.to_params().get("before-msg"), Some("m1"));
        assert_eq!(query.to_params().get("page-size"), Some("20"));
    }
}
