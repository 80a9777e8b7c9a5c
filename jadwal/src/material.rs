use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Course material folders, keyed by the material code used in the schedule.
static MATERIALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
  HashMap::from([
    ("CTR", "https://drive.google.com/drive/folders/15bTWeG9AEzaFbnO3P1Ysp_7GqZ7Q8r6B"),
    ("CEX", "https://drive.google.com/drive/folders/1nF7l7xsM2nAAHmuxXOPBC6qTAsmSGZfg"),
    ("ITF", "https://drive.google.com/drive/folders/1w6XUfYvh60nNKXI1TrYDWHk_Gu1ScT4k"),
    ("Legal", "https://drive.google.com/drive/folders/1-XjL0YWGINAQKSG-EwOc-HY8pGdsuIX2"),
    ("OPX", "https://drive.google.com/drive/folders/1PVqsZqCUVTLQnvi_KUgLVBcLGGod1YIB"),
    ("KRD", "https://drive.google.com/drive/folders/1uIwZfdfbNuink94C9p3fcCu8x0QQw_3D"),
    ("DRB", "https://drive.google.com/drive/folders/1g8aGDiZ3WUkM83YqWLd47DZ4i-EVvg1j"),
    ("FMA", "https://drive.google.com/drive/folders/1h1ylQ6lowGMprJL08Rw7CUxyW7RM-VoY"),
    ("Treasury", "https://drive.google.com/drive/folders/1pdPgVuvUfhOGZKhd-KkcA4PV2zVNePLO"),
    ("WMG", "https://drive.google.com/drive/folders/1064eYOCPuQ8eHQSjeOe5pK9FzDfOfoPD"),
    ("CDD", "https://drive.google.com/drive/folders/1dB33uC4DMKaSmNyOXnzIPsny3Ej_1WOH"),
    ("RTG", "https://drive.google.com/drive/folders/1PikdPE-6tV40i5rNeDgbSI_h6W7PMu99"),
    ("RFG", "https://drive.google.com/drive/folders/1onD-STfw-IGvQitLtyF1lmEo4k2IHRR4"),
    ("PPM", "https://drive.google.com/drive/folders/1ZhRkG3gtjtizMWzPXGVexk82bdb9wo84"),
    ("ORD", "https://drive.google.com/drive/folders/1zFSXsxvcG1nsWU1ArXlFBEtdWTixi-3g"),
    ("INT", "https://drive.google.com/drive/folders/1_86LkbtSyQv9nutXkWvktIiuOGyxp4ET"),
    ("UNS", "https://drive.google.com/drive/folders/1jiNwE0PWhJDd0QSTAg_1CNKdxPjlJXhD"),
    ("MBD", "https://drive.google.com/drive/folders/13A-TiuoLIvpQZWzCrHS3Wa0p_UwZOrgi"),
    ("CBS", "https://drive.google.com/drive/folders/1iO5EkwThEEWlfykndyDhenkwwbTsSEjl"),
  ])
});

pub fn material_url(code: &str) -> Option<&'static str> {
  MATERIALS.get(code.trim()).copied()
}
