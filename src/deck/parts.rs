//! XML for the parts of a minimal PresentationML package: one master, one blank layout, one
//! theme, N slides.

use std::fmt::Write as _;

use crate::deck::sink::{CaptionText, DeckStyle};
use crate::foundation::core::Rect;
use crate::foundation::xml::xml_escape;
use crate::layout::Placement;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_PML: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_BASE: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Empty group properties every shape tree starts with.
const SP_TREE_HEAD: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

/// An embedded picture file inside `ppt/media/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MediaKind {
    /// File extension used for the part name.
    pub ext: &'static str,
    /// MIME type registered in `[Content_Types].xml`.
    pub content_type: &'static str,
}

impl MediaKind {
    /// Kind for a sniffed image format, or `None` if slides cannot embed it.
    pub fn for_format(format: image::ImageFormat) -> Option<Self> {
        let (ext, content_type) = match format {
            image::ImageFormat::Png => ("png", "image/png"),
            image::ImageFormat::Jpeg => ("jpeg", "image/jpeg"),
            image::ImageFormat::Bmp => ("bmp", "image/bmp"),
            image::ImageFormat::Gif => ("gif", "image/gif"),
            image::ImageFormat::Tiff => ("tiff", "image/tiff"),
            _ => return None,
        };
        Some(Self { ext, content_type })
    }
}

fn relationships(rels: &[(String, &str, String)]) -> String {
    let mut out = format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
    );
    for (id, kind, target) in rels {
        let _ = write!(
            out,
            r#"<Relationship Id="{id}" Type="{kind}" Target="{}"/>"#,
            xml_escape(target)
        );
    }
    out.push_str("</Relationships>");
    out
}

pub(crate) fn content_types(slide_count: usize, media: &[MediaKind]) -> String {
    let mut out = format!(
        concat!(
            "{}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#
        ),
        XML_DECL
    );
    let mut seen: Vec<&str> = Vec::new();
    for kind in media {
        if seen.contains(&kind.ext) {
            continue;
        }
        seen.push(kind.ext);
        let _ = write!(
            out,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            kind.ext, kind.content_type
        );
    }
    let _ = write!(
        out,
        concat!(
            r#"<Override PartName="/ppt/presentation.xml" ContentType="{ct}.presentation.main+xml"/>"#,
            r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{ct}.slideMaster+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{ct}.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
        ),
        ct = CT_BASE
    );
    for n in 1..=slide_count {
        let _ = write!(
            out,
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT_BASE}.slide+xml"/>"#
        );
    }
    out.push_str("</Types>");
    out
}

pub(crate) fn package_rels() -> String {
    relationships(&[
        (
            "rId1".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            "ppt/presentation.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml".to_string(),
        ),
        (
            "rId3".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            "docProps/app.xml".to_string(),
        ),
    ])
}

pub(crate) fn core_props(title: &str) -> String {
    format!(
        concat!(
            "{}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{}</dc:title><dc:creator>photoreel</dc:creator></cp:coreProperties>"
        ),
        XML_DECL,
        xml_escape(title)
    )
}

pub(crate) fn app_props(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>photoreel</Application><Slides>{}</Slides></Properties>"
        ),
        XML_DECL, slide_count
    )
}

pub(crate) fn presentation(style: &DeckStyle, slide_count: usize) -> String {
    let mut out = format!(
        concat!(
            "{}",
            r#"<p:presentation {} saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#
        ),
        XML_DECL, NS_PML
    );
    if slide_count > 0 {
        out.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            let _ = write!(
                out,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + i,
                slide_rel_id(i)
            );
        }
        out.push_str("</p:sldIdLst>");
    }
    let _ = write!(
        out,
        concat!(
            r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/>"#,
            "</p:presentation>"
        ),
        style.slide_width_emu, style.slide_height_emu
    );
    out
}

/// Relationship id number of slide `i` (0-based) in `presentation.xml.rels`.
fn slide_rel_id(i: usize) -> usize {
    i + 3
}

pub(crate) fn presentation_rels(slide_count: usize) -> String {
    let mut rels = vec![
        (
            "rId1".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
            "theme/theme1.xml".to_string(),
        ),
    ];
    for i in 0..slide_count {
        rels.push((
            format!("rId{}", slide_rel_id(i)),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    relationships(&rels)
}

pub(crate) fn slide_master() -> String {
    format!(
        concat!(
            "{}",
            "<p:sldMaster {}>",
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            "<p:spTree>{}</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
            r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        XML_DECL, NS_PML, SP_TREE_HEAD
    )
}

pub(crate) fn slide_master_rels() -> String {
    relationships(&[
        (
            "rId1".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            "../slideLayouts/slideLayout1.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
            "../theme/theme1.xml".to_string(),
        ),
    ])
}

pub(crate) fn blank_layout() -> String {
    format!(
        concat!(
            "{}",
            r#"<p:sldLayout {} type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank"><p:spTree>{}</p:spTree></p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
        ),
        XML_DECL, NS_PML, SP_TREE_HEAD
    )
}

pub(crate) fn blank_layout_rels() -> String {
    relationships(&[(
        "rId1".to_string(),
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
        "../slideMasters/slideMaster1.xml".to_string(),
    )])
}

pub(crate) fn slide_rels(media_name: &str) -> String {
    relationships(&[
        (
            "rId1".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            "../slideLayouts/slideLayout1.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
            format!("../media/{media_name}"),
        ),
    ])
}

/// Integer EMU bounds `(x, y, cx, cy)` of a continuous rectangle.
pub(crate) fn emu_bounds(rect: Rect) -> (i64, i64, i64, i64) {
    (
        rect.x0.round() as i64,
        rect.y0.round() as i64,
        rect.width().round().max(1.0) as i64,
        rect.height().round().max(1.0) as i64,
    )
}

fn xfrm(rect: Rect) -> String {
    let (x, y, cx, cy) = emu_bounds(rect);
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

pub(crate) fn slide(
    style: &DeckStyle,
    picture: &Placement,
    picture_name: &str,
    caption: &CaptionText,
) -> String {
    let mut out = format!(
        "{XML_DECL}<p:sld {NS_PML}><p:cSld><p:spTree>{SP_TREE_HEAD}"
    );

    let _ = write!(
        out,
        concat!(
            "<p:pic><p:nvPicPr>",
            r#"<p:cNvPr id="2" name="Picture 1" descr="{descr}"/>"#,
            r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
        ),
        descr = xml_escape(picture_name),
        xfrm = xfrm(picture.rect()),
    );

    let [r, g, b] = style.caption_rgb;
    let run_props = format!(
        concat!(
            r#"lang="en-US" sz="{sz}" b="{bold}" dirty="0">"#,
            r#"<a:solidFill><a:srgbClr val="{r:02X}{g:02X}{b:02X}"/></a:solidFill>"#,
            r#"<a:latin typeface="{face}"/><a:cs typeface="{face}"/>"#
        ),
        sz = style.caption_size_centipoints(),
        bold = u8::from(style.caption_bold),
        r = r,
        g = g,
        b = b,
        face = xml_escape(&style.caption_font),
    );

    let _ = write!(
        out,
        concat!(
            "<p:sp><p:nvSpPr>",
            r#"<p:cNvPr id="3" name="TextBox 2"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#,
            r#"<a:p><a:pPr algn="just"/>"#
        ),
        xfrm = xfrm(caption.bounds),
    );
    for (i, line) in caption.lines.iter().enumerate() {
        if i > 0 {
            let _ = write!(out, "<a:br><a:rPr {run_props}</a:rPr></a:br>");
        }
        let _ = write!(
            out,
            "<a:r><a:rPr {run_props}</a:rPr><a:t>{}</a:t></a:r>",
            xml_escape(line)
        );
    }
    let _ = write!(out, "<a:endParaRPr {run_props}</a:endParaRPr>");
    out.push_str("</a:p></p:txBody></p:sp>");

    out.push_str(
        "</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
    );
    out
}

/// Office theme with the stock color, font and format schemes.
pub(crate) fn theme() -> String {
    let colors = [
        ("dk1", r#"<a:sysClr val="windowText" lastClr="000000"/>"#),
        ("lt1", r#"<a:sysClr val="window" lastClr="FFFFFF"/>"#),
        ("dk2", r#"<a:srgbClr val="44546A"/>"#),
        ("lt2", r#"<a:srgbClr val="E7E6E6"/>"#),
        ("accent1", r#"<a:srgbClr val="4472C4"/>"#),
        ("accent2", r#"<a:srgbClr val="ED7D31"/>"#),
        ("accent3", r#"<a:srgbClr val="A5A5A5"/>"#),
        ("accent4", r#"<a:srgbClr val="FFC000"/>"#),
        ("accent5", r#"<a:srgbClr val="5B9BD5"/>"#),
        ("accent6", r#"<a:srgbClr val="70AD47"/>"#),
        ("hlink", r#"<a:srgbClr val="0563C1"/>"#),
        ("folHlink", r#"<a:srgbClr val="954F72"/>"#),
    ];
    let mut clr = String::from(r#"<a:clrScheme name="Office">"#);
    for (name, value) in colors {
        let _ = write!(clr, "<a:{name}>{value}</a:{name}>");
    }
    clr.push_str("</a:clrScheme>");

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{w}" cap="flat" cmpd="sng" algn="ctr">{solid}<a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#
        )
    };

    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#,
            "<a:themeElements>{clr}",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst>",
            "<a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst>",
            "<a:effectStyleLst>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "</a:effectStyleLst>",
            "<a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements>",
            "<a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
        ),
        decl = XML_DECL,
        clr = clr,
        solid = solid,
        l1 = line(6350),
        l2 = line(12700),
        l3 = line(19050),
    )
}
