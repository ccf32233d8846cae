use serde::{Deserialize, Deserializer};

use crate::prompt::Prompt;
use crate::request::Site;
use crate::{Error, Result};

/// A named bookmark folder and the place ids it holds, in site order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    pub name: String,
    #[serde(deserialize_with = "place_ids")]
    pub bookmarks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(rename = "bookmarksFolders", default)]
    bookmarks_folders: Vec<Folder>,
}

/// Ids come back as numbers or strings depending on the endpoint version.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

fn place_ids<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Vec<String>, D::Error> {
    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|id| match id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        })
        .collect())
}

pub fn parse_folders(json: &str) -> Result<Vec<Folder>> {
    Ok(serde_json::from_str::<UserResponse>(json)?.bookmarks_folders)
}

/// Fetches the user's bookmark folders. Any failure here ends the run.
pub async fn list_folders(site: &dyn Site, session: &str) -> Result<Vec<Folder>> {
    let json = site.fetch_user(session).await?;
    parse_folders(&json)
}

/// Shows the folders as a numbered menu and asks until a valid number is given.
/// Returns the chosen folder's ids and name.
pub fn choose_folder(prompt: &mut dyn Prompt, folders: &[Folder]) -> Result<(Vec<String>, String)> {
    if folders.is_empty() {
        return Err(Error::NoFolders);
    }

    prompt.tell("\nAvailable folders:");
    for (i, folder) in folders.iter().enumerate() {
        prompt.tell(&format!(
            "{}. {} ({} bookmarks)",
            i + 1,
            folder.name,
            folder.bookmarks.len()
        ));
    }

    let question = format!("\nEnter folder number (1-{}): ", folders.len());
    let choice = loop {
        let answer = prompt.ask(&question)?;
        match answer.trim().parse::<i128>() {
            Ok(n) if n >= 1 && n <= folders.len() as i128 => break n as usize,
            Ok(_) => prompt.tell("Invalid choice. Please try again."),
            Err(_) if is_integer(answer.trim()) => prompt.tell("Invalid choice. Please try again."),
            Err(_) => prompt.tell("Please enter a valid number."),
        }
    };

    let folder = &folders[choice - 1];
    prompt.tell(&format!(
        "\nFound {} bookmarks in folder '{}':",
        folder.bookmarks.len(),
        folder.name
    ));
    prompt.tell("\nBookmark IDs:");
    prompt.tell(&folder.bookmarks.join(", "));

    Ok((folder.bookmarks.clone(), folder.name.clone()))
}

/// Signed decimal integer of any length.
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use async_trait::async_trait;

    const USER: &str = r#"{
        "id": 99,
        "bookmarksFolders": [
            {"name": "Südtirol", "bookmarks": [30, 10, 20]},
            {"name": "Leer", "bookmarks": []},
            {"name": "Frankreich", "bookmarks": ["5", 4]}
        ]
    }"#;

    #[test]
    fn odd_numeric_ids_keep_their_text() {
        let folders = parse_folders(
            r#"{"bookmarksFolders":[{"name":"X","bookmarks":[-3, 1.5, 12]}]}"#,
        )
        .unwrap();
        assert_eq!(folders[0].bookmarks, ["-3", "1.5", "12"]);
    }

    struct UserSite(Option<String>);

    #[async_trait]
    impl Site for UserSite {
        async fn fetch_user(&self, _session: &str) -> Result<String> {
            match &self.0 {
                Some(json) => Ok(json.clone()),
                None => Err(Error::HttpStatus {
                    url: "user".into(),
                    status: 403,
                }),
            }
        }

        async fn fetch_place_page(&self, _id: &str) -> Result<String> {
            unreachable!()
        }
    }

    fn folders() -> Vec<Folder> {
        parse_folders(USER).unwrap()
    }

    #[test]
    fn folders_keep_order_and_ids() {
        let folders = folders();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Südtirol", "Leer", "Frankreich"]);
        assert_eq!(folders[0].bookmarks, ["30", "10", "20"]);
        assert!(folders[1].bookmarks.is_empty());
        assert_eq!(folders[2].bookmarks, ["5", "4"]);
    }

    #[test]
    fn missing_folder_key_is_empty() {
        assert!(parse_folders(r#"{"id": 1}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_folders("<html>"), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn list_folders_parses_response() {
        let site = UserSite(Some(USER.to_string()));
        assert_eq!(list_folders(&site, "tok").await.unwrap(), folders());
    }

    #[tokio::test]
    async fn list_folders_propagates_http_errors() {
        let site = UserSite(None);
        let err = list_folders(&site, "tok").await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let mut prompt = ScriptedPrompt::new([
            "abc",
            "0",
            "4",
            "-1",
            "99999999999999999999999",
            "999999999999999999999999999999999999999999",
            "2.5",
            " 3 ",
        ]);
        let (ids, name) = choose_folder(&mut prompt, &folders()).unwrap();

        assert_eq!(name, "Frankreich");
        assert_eq!(ids, ["5", "4"]);
        assert_eq!(prompt.questions.len(), 8);
        assert!(prompt.output.contains(&"1. Südtirol (3 bookmarks)".to_string()));
        assert!(prompt.output.contains(&"Please enter a valid number.".to_string()));
        assert_eq!(
            prompt
                .output
                .iter()
                .filter(|l| *l == "Invalid choice. Please try again.")
                .count(),
            5
        );
        assert_eq!(
            prompt
                .output
                .iter()
                .filter(|l| *l == "Please enter a valid number.")
                .count(),
            2
        );
        assert_eq!(prompt.output.last().unwrap(), "5, 4");
    }

    #[test]
    fn choose_without_folders_fails() {
        let mut prompt = ScriptedPrompt::new(["1"]);
        assert!(matches!(
            choose_folder(&mut prompt, &[]),
            Err(Error::NoFolders)
        ));
        assert_eq!(prompt.remaining(), 1);
    }
}
