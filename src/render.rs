//! Rendering of the Cisco IP phone XML dialect
//!
//! Two documents: the directory listing (`CiscoIPPhoneDirectory`) and the
//! search prompt (`CiscoIPPhoneInput`). The firmware is strict about the
//! schema, so the fixed parts are emitted verbatim.

use quick_xml::escape::escape;

use crate::directory::DirectoryEntry;

/// Renders the directory listing for an already filtered and sorted set of
/// records. An empty set still renders a well-formed document.
pub fn render_directory(entries: &[DirectoryEntry]) -> String {
    let mut xml = String::from("<CiscoIPPhoneDirectory>\n");
    xml.push_str("\t<Title>Phone directory</Title>\n");
    xml.push_str("\t<Prompt>Select an entry.</Prompt>\n");
    for entry in entries {
        let display = entry.to_string();
        xml.push_str("\t<DirectoryEntry>\n");
        xml.push_str(&format!("\t\t<Name>{}</Name>\n", escape(display.as_str())));
        xml.push_str(&format!("\t\t<Telephone>{}</Telephone>\n", entry.number()));
        xml.push_str("\t</DirectoryEntry>\n");
    }
    xml.push_str("</CiscoIPPhoneDirectory>\n");
    xml
}

/// Renders the search prompt shown when no keyword was submitted.
///
/// The submission URL embeds the configured directory port, not the port the
/// request arrived on.
pub fn render_search_prompt(server_name: &str, directory_port: u16) -> String {
    let mut xml = String::from("<CiscoIPPhoneInput>\n");
    xml.push_str("\t<Title>Search for an entry</Title>\n");
    xml.push_str("\t<Prompt>Enter a search keyword.</Prompt>\n");
    xml.push_str(&format!(
        "\t<URL>http://{}:{}/directory.xml</URL>\n",
        escape(server_name),
        directory_port
    ));
    xml.push_str("\t<InputItem>\n");
    xml.push_str("\t\t<DisplayName>Keyword</DisplayName>\n");
    xml.push_str("\t\t<QueryStringParam>keyword</QueryStringParam>\n");
    xml.push_str("\t\t<InputFlags></InputFlags>\n");
    xml.push_str("\t\t<DefaultValue></DefaultValue>\n");
    xml.push_str("\t</InputItem>\n");
    xml.push_str("</CiscoIPPhoneInput>\n");
    xml
}
