//! PDF merging using lopdf

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Merge PDF files into a single document, in the order given
///
/// Pages are concatenated input by input. The output file is created or
/// overwritten at `output_path`.
pub fn merge_pdfs<P: AsRef<Path>>(input_paths: &[P], output_path: &Path) -> Result<()> {
    if input_paths.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    let mut documents: Vec<Document> = Vec::new();
    for path in input_paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.to_path_buf()));
        }

        documents.push(doc);
    }

    // Renumber each document's objects into one shared ID space and pool
    // them, remembering page IDs in input order.
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        page_ids.extend(doc.get_pages().into_values());
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);

    // new_object_id() hands out max_id + 1; without this it would collide
    // with the pooled objects.
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));

    let catalog_id = merged.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Every page must point at the new Pages node
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(ref mut dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged.compress();
    merged.save(output_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::count_pages;
    use lopdf::dictionary;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Build a minimal PDF with `page_count` empty pages
    fn write_test_pdf(dir: &Path, name: &str, page_count: usize) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::new();
        for _ in 0..page_count {
            let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => Object::Integer(page_count as i64),
                "Kids" => kids,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let path = dir.join(name);
        doc.save(&path).unwrap();
        path
    }

    #[test]
    fn test_merge_concatenates_pages_in_order() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![
            write_test_pdf(dir.path(), "a.pdf", 2),
            write_test_pdf(dir.path(), "b.pdf", 3),
            write_test_pdf(dir.path(), "c.pdf", 1),
        ];
        let output = dir.path().join("merged.pdf");

        merge_pdfs(&inputs, &output).unwrap();

        assert_eq!(count_pages(&output).unwrap(), 6);
    }

    #[test]
    fn test_merge_single_input() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![write_test_pdf(dir.path(), "only.pdf", 4)];
        let output = dir.path().join("merged.pdf");

        merge_pdfs(&inputs, &output).unwrap();

        assert_eq!(count_pages(&output).unwrap(), 4);
    }

    #[test]
    fn test_merge_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("merged.pdf");

        let first = vec![write_test_pdf(dir.path(), "a.pdf", 1)];
        merge_pdfs(&first, &output).unwrap();
        assert_eq!(count_pages(&output).unwrap(), 1);

        let second = vec![write_test_pdf(dir.path(), "b.pdf", 3)];
        merge_pdfs(&second, &output).unwrap();
        assert_eq!(count_pages(&output).unwrap(), 3);
    }

    #[test]
    fn test_merge_empty_input_list() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<PathBuf> = Vec::new();

        let result = merge_pdfs(&inputs, &dir.path().join("merged.pdf"));

        assert!(matches!(result, Err(Error::General(_))));
    }

    #[test]
    fn test_merge_zero_page_input() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![write_test_pdf(dir.path(), "empty.pdf", 0)];

        let result = merge_pdfs(&inputs, &dir.path().join("merged.pdf"));

        assert!(matches!(result, Err(Error::EmptyPdf(_))));
    }

    #[test]
    fn test_merge_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![dir.path().join("nope.pdf")];

        let result = merge_pdfs(&inputs, &dir.path().join("merged.pdf"));

        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
