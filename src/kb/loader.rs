use std::path::Path;

use tracing::info;

use super::KbError;
use super::index::Document;

const QUERY_COL: &str = "query";
const ANSWER_COL: &str = "answer";

/// Reads the knowledge base CSV. The file must carry `query` and `answer`
/// header columns; order and extra columns are ignored. Missing cells become
/// empty strings here, once, so the index never sees a non-string value.
pub fn load_corpus(path: &Path) -> Result<Vec<Document>, KbError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        if e.is_io_error() {
            KbError::NotFound(path.display().to_string())
        } else {
            KbError::Csv(e)
        }
    })?;

    let headers = reader.headers()?.clone();
    let query_at = headers.iter().position(|h| h == QUERY_COL);
    let answer_at = headers.iter().position(|h| h == ANSWER_COL);

    let (Some(query_at), Some(answer_at)) = (query_at, answer_at) else {
        let missing: Vec<&str> = [(QUERY_COL, query_at), (ANSWER_COL, answer_at)]
            .iter()
            .filter(|(_, at)| at.is_none())
            .map(|(name, _)| *name)
            .collect();
        return Err(KbError::MissingColumns(missing.join(", ")));
    };

    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record?;
        docs.push(Document {
            query: record.get(query_at).unwrap_or("").to_string(),
            answer: record.get(answer_at).unwrap_or("").to_string(),
        });
    }

    info!(path = %path.display(), entries = docs.len(), "knowledge base loaded");
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_query_and_answer_columns() {
        let path = write_temp(
            "krishi_kb_ok.csv",
            "id,query,answer\n1,What soil for tomato?,Loamy soil\n2,Pest control?,Neem oil\n",
        );
        let docs = load_corpus(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].query, "What soil for tomato?");
        assert_eq!(docs[1].answer, "Neem oil");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_corpus(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }

    #[test]
    fn missing_columns_are_named() {
        let path = write_temp("krishi_kb_cols.csv", "question,reply\nq,a\n");
        let err = load_corpus(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("query"), "got: {msg}");
        assert!(msg.contains("answer"), "got: {msg}");
    }

    #[test]
    fn short_rows_become_empty_strings() {
        let path = write_temp(
            "krishi_kb_short.csv",
            "query,answer\nonly a query,\n,only an answer\n",
        );
        let docs = load_corpus(&path).unwrap();
        assert_eq!(docs[0].answer, "");
        assert_eq!(docs[1].query, "");
    }
}
