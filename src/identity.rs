use std::env;
use std::fmt::Display;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::Constants;
use crate::error::{Error, Result};

const TIMEZONE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[offset_hour sign:mandatory][offset_minute]");

/// Name and email of whoever authors or commits a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    email: String,
}

impl Identity {
    /// Builds an identity, reporting `name_var` or `email_var` if the matching value is blank or
    /// contains characters that would break the identity line (`<`, `>` or a newline).
    fn from_values(
        name: &str,
        email: &str,
        name_var: &'static str,
        email_var: &'static str,
    ) -> Result<Self> {
        Ok(Self {
            name: checked(name, name_var)?,
            email: checked(email, email_var)?,
        })
    }

    /// Reads the author and committer identities from the process environment.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as `Identity::from_lookup`.
    pub fn from_env() -> Result<(Identity, Identity)> {
        Identity::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the author identity from `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL`, and the committer
    /// from `GIT_COMMITTER_NAME` and `GIT_COMMITTER_EMAIL`. Committer values that are not set fall
    /// back to the author's.
    ///
    /// There is no default identity: a missing author value is an error instead of a malformed
    /// line in the commit.
    ///
    /// # Errors
    ///
    /// This function fails with `Error::MissingIdentity`, naming the variable, if an author value
    /// is missing or any value is not valid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<(Identity, Identity)> {
        let author_name = lookup(Constants::AUTHOR_NAME_VAR)
            .ok_or(Error::MissingIdentity(Constants::AUTHOR_NAME_VAR))?;
        let author_email = lookup(Constants::AUTHOR_EMAIL_VAR)
            .ok_or(Error::MissingIdentity(Constants::AUTHOR_EMAIL_VAR))?;
        let author = Identity::from_values(
            &author_name,
            &author_email,
            Constants::AUTHOR_NAME_VAR,
            Constants::AUTHOR_EMAIL_VAR,
        )?;

        let committer_name =
            lookup(Constants::COMMITTER_NAME_VAR).unwrap_or_else(|| author.name.clone());
        let committer_email =
            lookup(Constants::COMMITTER_EMAIL_VAR).unwrap_or_else(|| author.email.clone());
        let committer = Identity::from_values(
            &committer_name,
            &committer_email,
            Constants::COMMITTER_NAME_VAR,
            Constants::COMMITTER_EMAIL_VAR,
        )?;

        Ok((author, committer))
    }

    /// Returns the identity line stored in commits: `{name} <{email}> {timestamp} {timezone}`.
    ///
    /// # Errors
    ///
    /// This function fails if the timezone could not be formatted.
    pub fn line(&self, at: OffsetDateTime) -> Result<String> {
        Ok(format!(
            "{} {} {}",
            self,
            at.unix_timestamp(),
            format_offset(at.offset())?
        ))
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Current time in the local timezone, or UTC if the local offset can't be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn format_offset(offset: UtcOffset) -> Result<String> {
    Ok(offset.format(TIMEZONE_FORMAT)?)
}

fn checked(value: &str, var: &'static str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || value.contains(['<', '>', '\n']) {
        return Err(Error::MissingIdentity(var));
    }
    Ok(value.to_owned())
}

// Tests
