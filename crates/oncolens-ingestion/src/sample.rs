//! Template document offered to users preparing a batch file.

/// Three example rows with every supported column.
pub const SAMPLE_BATCH_CSV: &str = "\
id,name,age,meanRadius,meanTexture,meanPerimeter,meanArea,meanSmoothness,worstRadius,worstTexture,worstPerimeter,worstArea,worstSmoothness
P001,Patient One,45,14.2,19.5,92.3,654.2,0.095,16.1,25.8,108.5,882.1,0.131
P002,Patient Two,52,13.8,18.2,88.7,582.3,0.089,15.2,23.4,102.1,765.8,0.124
P003,Patient Three,38,15.1,22.1,98.5,721.4,0.102,17.8,28.9,115.3,995.7,0.145
";
