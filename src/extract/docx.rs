use super::{Extracted, Extractor, TextRecord};
use crate::error::{DocgrepError, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use std::fs;
use std::path::Path;

/// One record per top-level paragraph, empty paragraphs included so the
/// numbering follows the document.
pub struct WordDocumentExtractor;

impl Extractor for WordDocumentExtractor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, path: &Path) -> Result<Extracted> {
        let data = fs::read(path)?;
        let docx = read_docx(&data).map_err(|e| DocgrepError::Document(e.to_string()))?;

        let paragraphs = docx
            .document
            .children
            .into_iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => {
                    let mut text = String::new();
                    for child in para.children {
                        push_paragraph_text(child, &mut text);
                    }
                    Some(text)
                }
                _ => None,
            })
            .enumerate()
            .map(|(i, content)| TextRecord {
                index: i + 1,
                content,
            })
            .collect();

        Ok(Extracted::Paragraphs(paragraphs))
    }
}

fn push_paragraph_text(child: ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => {
            for child in run.children {
                match child {
                    RunChild::Text(text) => out.push_str(&text.text),
                    RunChild::Tab(_) => out.push('\t'),
                    _ => {}
                }
            }
        }
        ParagraphChild::Hyperlink(link) => {
            for child in link.children {
                push_paragraph_text(child, out);
            }
        }
        _ => {}
    }
}
