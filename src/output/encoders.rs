//! Result encoders, one per output format

use crate::model::ScrapeResult;
use crate::output::{OutputError, OutputFormat, OutputResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write;

/// Trait for result encoders
///
/// An encoder turns one result into the bytes of a result file. Encoders are
/// stateless and shared across persistence tasks.
pub trait ResultEncoder: Send + Sync {
    /// The format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Writes the encoded result to `out`
    ///
    /// # Arguments
    ///
    /// * `result` - The result to encode
    /// * `out` - Destination for the encoded bytes
    fn encode(&self, result: &ScrapeResult, out: &mut dyn Write) -> OutputResult<()>;
}

fn encode_error(format: OutputFormat, err: impl Display) -> OutputError {
    OutputError::Encode {
        format,
        message: err.to_string(),
    }
}

/// Labeled plain-text block
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncoder;

impl ResultEncoder for TextEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }

    fn encode(&self, result: &ScrapeResult, out: &mut dyn Write) -> OutputResult<()> {
        write!(out, "Title: {}\n\n", result.title)?;
        write!(out, "URL: {}\n\n", result.url)?;
        write!(out, "Selector: {}\n\n", result.selector)?;
        write!(out, "Image URLs:\n\n")?;
        for image_url in &result.image_urls {
            writeln!(out, "- {}", image_url)?;
        }
        Ok(())
    }
}

/// Header row plus one row per image URL
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder;

const CSV_HEADER: [&str; 4] = ["Title", "URL", "Selector", "Image URLs"];

impl ResultEncoder for CsvEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn encode(&self, result: &ScrapeResult, out: &mut dyn Write) -> OutputResult<()> {
        let mut writer = csv::Writer::from_writer(out);

        writer
            .write_record(CSV_HEADER)
            .map_err(|e| encode_error(OutputFormat::Csv, e))?;

        for image_url in &result.image_urls {
            writer
                .write_record([
                    result.title.as_str(),
                    result.url.as_str(),
                    result.selector.as_str(),
                    image_url.as_str(),
                ])
                .map_err(|e| encode_error(OutputFormat::Csv, e))?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl ResultEncoder for JsonEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn encode(&self, result: &ScrapeResult, out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, result)
            .map_err(|e| encode_error(OutputFormat::Json, e))?;
        writeln!(out)?;
        Ok(())
    }
}

/// XML layout of a persisted result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ScrapeResult")]
struct XmlScrapeResult {
    title: String,
    url: String,
    selector: String,
    #[serde(rename = "imgUrls", default)]
    img_urls: XmlImageUrls,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct XmlImageUrls {
    #[serde(rename = "imgUrl", default)]
    img_url: Vec<String>,
}

impl From<&ScrapeResult> for XmlScrapeResult {
    fn from(result: &ScrapeResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            selector: result.selector.clone(),
            img_urls: XmlImageUrls {
                img_url: result.image_urls.clone(),
            },
        }
    }
}

impl From<XmlScrapeResult> for ScrapeResult {
    fn from(doc: XmlScrapeResult) -> Self {
        Self {
            title: doc.title,
            url: doc.url,
            selector: doc.selector,
            image_urls: doc.img_urls.img_url,
        }
    }
}

/// Indented XML document
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl ResultEncoder for XmlEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xml
    }

    fn encode(&self, result: &ScrapeResult, out: &mut dyn Write) -> OutputResult<()> {
        let doc = XmlScrapeResult::from(result);

        let mut buffer = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
        serializer.indent(' ', 2);
        doc.serialize(serializer)
            .map_err(|e| encode_error(OutputFormat::Xml, e))?;

        out.write_all(buffer.as_bytes())?;
        writeln!(out)?;
        Ok(())
    }
}

/// Reads back a result written by [`XmlEncoder`]
pub fn parse_xml_result(xml: &str) -> OutputResult<ScrapeResult> {
    let doc: XmlScrapeResult =
        quick_xml::de::from_str(xml).map_err(|e| encode_error(OutputFormat::Xml, e))?;
    Ok(doc.into())
}
