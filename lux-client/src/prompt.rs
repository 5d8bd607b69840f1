//! Interactive filter entry

use std::io::Write;

use lux_common::{Result, SearchRequest};
use tokio::io::{AsyncBufRead, Lines};

const FIELDS: [&str; 4] = ["Label", "Classifier", "Agent", "Date"];

/// Prompt for the four filter fields, one line each
///
/// Values are trimmed. Returns `None` once input is exhausted.
pub async fn read_request<R, W>(input: &mut Lines<R>, out: &mut W) -> Result<Option<SearchRequest>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut values: [String; 4] = Default::default();
    for (value, name) in values.iter_mut().zip(FIELDS) {
        write!(out, "{}: ", name)?;
        out.flush()?;

        match input.next_line().await? {
            Some(line) => *value = line.trim().to_string(),
            None => return Ok(None),
        }
    }

    let [label, classifier, agent, date] = values;
    Ok(Some(SearchRequest {
        label,
        classifier,
        agent,
        date,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;

    #[tokio::test]
    async fn test_reads_and_trims_four_fields() {
        let mut input = (&b"  vase \n\nalba\n 1950\n"[..]).lines();
        let mut out = Vec::new();

        let request = read_request(&mut input, &mut out).await.unwrap().unwrap();

        assert_eq!(
            request,
            SearchRequest {
                label: "vase".to_string(),
                classifier: "".to_string(),
                agent: "alba".to_string(),
                date: "1950".to_string(),
            }
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Label: Classifier: Agent: Date: "
        );
    }

    #[tokio::test]
    async fn test_eof_mid_request_ends_session() {
        let mut input = (&b"vase\n"[..]).lines();
        let mut out = Vec::new();
        assert!(read_request(&mut input, &mut out).await.unwrap().is_none());
    }
}
