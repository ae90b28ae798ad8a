use std::process::Command;
use std::sync::{Mutex, PoisonError};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info};

use super::contact::MobileNumber;
use super::domain::CandidateRecord;

const WHATSAPP_SEND_URL: &str = "https://web.whatsapp.com/send";
const WHATSAPP_COUNTRY_CODE: &str = "91";
pub(crate) const MISSING_FIELD: &str = "N/A";

/// Everything outside `A-Za-z0-9_.-~/` is escaped.
const QUOTE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Outbound hook that hands a URL to another application.
pub trait LinkLauncher: Send + Sync {
    fn launch(&self, url: &str) -> Result<(), LaunchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start browser for {url}: {source}")]
    Spawn {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("browser exited with {status} while opening {url}")]
    Exit { url: String, status: String },
}

/// Opens links with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url);
            command
        } else if cfg!(target_os = "windows") {
            // ShellExecute directly; cmd.exe would split the URL at `&`.
            let mut command = Command::new("rundll32");
            command.args(["url.dll,FileProtocolHandler", url]);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }
}

impl LinkLauncher for SystemBrowser {
    fn launch(&self, url: &str) -> Result<(), LaunchError> {
        let status = Self::command(url)
            .status()
            .map_err(|source| LaunchError::Spawn {
                url: url.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Exit {
                url: url.to_string(),
                status: status.to_string(),
            })
        }
    }
}

/// Collects launched URLs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn launched(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LinkLauncher for RecordingLauncher {
    fn launch(&self, url: &str) -> Result<(), LaunchError> {
        self.launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        Ok(())
    }
}

/// The record's resume link, if it holds anything other than whitespace.
pub fn resume_link(record: &CandidateRecord) -> Option<&str> {
    record
        .resume_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// The record's contact as a dialable mobile number, if it is one.
pub fn whatsapp_number(record: &CandidateRecord) -> Option<MobileNumber> {
    record.contact.as_deref().and_then(MobileNumber::parse)
}

/// `https://web.whatsapp.com/send?phone=91<digits>&text=Hi%20<name>`
pub fn whatsapp_link(name: Option<&str>, phone: &MobileNumber) -> String {
    let greeting = format!("Hi {}", name.unwrap_or(MISSING_FIELD));
    format!(
        "{WHATSAPP_SEND_URL}?phone={WHATSAPP_COUNTRY_CODE}{phone}&text={}",
        quote(&greeting)
    )
}

/// Opens the resume link. Returns `false` without launching when the link is blank.
pub fn open_resume<L: LinkLauncher + ?Sized>(
    launcher: &L,
    url: &str,
) -> Result<bool, LaunchError> {
    let url = url.trim();
    if url.is_empty() {
        debug!("no resume link to open");
        return Ok(false);
    }
    launcher.launch(url)?;
    info!(url, "opened resume");
    Ok(true)
}

/// Opens a prefilled chat. Returns `false` when `phone` is not a 10-digit mobile.
pub fn open_whatsapp<L: LinkLauncher + ?Sized>(
    launcher: &L,
    name: Option<&str>,
    phone: &str,
) -> Result<bool, LaunchError> {
    let Some(mobile) = MobileNumber::parse(phone) else {
        debug!("contact is not a 10-digit mobile number");
        return Ok(false);
    };
    let url = whatsapp_link(name, &mobile);
    launcher.launch(&url)?;
    info!(%mobile, "opened whatsapp chat");
    Ok(true)
}

fn quote(value: &str) -> String {
    utf8_percent_encode(value, QUOTE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile(raw: &str) -> MobileNumber {
        MobileNumber::parse(raw).expect("valid mobile")
    }

    #[test]
    fn whatsapp_link_prefixes_country_code_and_encodes_greeting() {
        let url = whatsapp_link(Some("Tushar Patel"), &mobile("9998887776"));
        assert_eq!(
            url,
            "https://web.whatsapp.com/send?phone=919998887776&text=Hi%20Tushar%20Patel"
        );
    }

    #[test]
    fn whatsapp_link_falls_back_to_placeholder_name() {
        let url = whatsapp_link(None, &mobile("9998887776"));
        assert!(url.ends_with("&text=Hi%20N/A"));
    }

    #[test]
    fn quote_encodes_reserved_and_multibyte_characters() {
        assert_eq!(quote("Hi A&B=C?"), "Hi%20A%26B%3DC%3F");
        assert_eq!(quote("Hi é"), "Hi%20%C3%A9");
        assert_eq!(quote("a/b_c.d-e~f"), "a/b_c.d-e~f");
    }

    #[test]
    fn system_browser_passes_the_link_as_one_argument() {
        let url = "https://web.whatsapp.com/send?phone=919998887776&text=Hi%20Tushar";
        let command = SystemBrowser::command(url);
        let last = command.get_args().last().and_then(|arg| arg.to_str());
        assert_eq!(last, Some(url));
    }

    #[cfg(windows)]
    #[test]
    fn windows_launch_bypasses_the_command_shell() {
        let url = "https://web.whatsapp.com/send?phone=919998887776&text=Hi%20Tushar";
        let command = SystemBrowser::command(url);
        assert_eq!(command.get_program(), "rundll32");
        let args: Vec<_> = command
            .get_args()
            .filter_map(|arg| arg.to_str())
            .collect();
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", url]);
    }

    #[test]
    fn blank_resume_is_a_no_op() {
        let launcher = RecordingLauncher::default();
        assert!(!open_resume(&launcher, "   ").expect("no-op succeeds"));
        assert!(launcher.launched().is_empty());

        assert!(open_resume(&launcher, " https://cv.example/a ").expect("launches"));
        assert_eq!(launcher.launched(), vec!["https://cv.example/a".to_string()]);
    }

    #[test]
    fn whatsapp_requires_a_valid_mobile() {
        let launcher = RecordingLauncher::default();
        assert!(!open_whatsapp(&launcher, Some("Meera"), "12345").expect("no-op succeeds"));
        assert!(open_whatsapp(&launcher, Some("Meera"), "+91 99988-87775").expect("launches"));
        assert_eq!(
            launcher.launched(),
            vec!["https://web.whatsapp.com/send?phone=919998887775&text=Hi%20Meera".to_string()]
        );
    }

    #[test]
    fn record_helpers_skip_blank_and_invalid_values() {
        let record = CandidateRecord {
            contact: Some("0261-2345678".to_string()),
            resume_url: Some("  ".to_string()),
            ..CandidateRecord::default()
        };
        assert!(resume_link(&record).is_none());
        assert!(whatsapp_number(&record).is_none());
    }
}
