pub use directory::{
    InMemoryUserDirectory, PostgresUserDirectory, UserDirectory, UserError, UserIdentity,
    UserProfile,
};

mod directory;
